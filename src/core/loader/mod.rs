//! CSV adapters that read the session's input files

pub mod csv_loader;

pub use csv_loader::{
    load_session_inputs, read_adult_assignments, read_assignment_records, read_courses,
    read_manual_assignments, read_preference_sheet, read_skip_list, read_students,
};

/// Sign-up answers, one row per submission
pub const PREFERENCES_FILE: &str = "student_preferences.csv";
/// Everyone enrolled, one row per student
pub const STUDENTS_FILE: &str = "student_list.csv";
/// Every class of every session
pub const CATALOG_FILE: &str = "class_catalog.csv";
/// Trusted placements (optional)
pub const MANUAL_ASSIGNMENTS_FILE: &str = "manual_assignments.csv";
/// Sign-up names to discard (optional)
pub const SKIP_LIST_FILE: &str = "skip_list.csv";
/// Volunteer class leaders (optional, reports only)
pub const ADULT_ASSIGNMENTS_FILE: &str = "adult_class_assignments.csv";
/// Output of the `assign` command
pub const FINAL_ASSIGNMENTS_FILE: &str = "final_assignments.csv";
