//! CLI command handlers for `SortingHat`.
//!
//! Each command is implemented in its own submodule.

pub mod assign;
pub mod config;
pub mod report;
