//! Shared library for `SortingHat`
//! Contains the assignment engine and the adapters used by the CLI

pub mod core;
pub mod logger;

pub use core::{config, get_version};
