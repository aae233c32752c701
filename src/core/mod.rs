//! Core module: data model, assignment engine and the CSV/report adapters around it

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod records;
pub mod report;

/// Returns the current version of the `SortingHat` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
