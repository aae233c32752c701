//! Data models for `SortingHat`

pub mod catalog;
pub mod course;
pub mod preference;
pub mod student;

pub use catalog::Catalog;
pub use course::Course;
pub use preference::{Interest, Preference};
pub use student::Student;
