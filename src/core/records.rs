//! In-memory records exchanged between the CSV adapters and the engine
//!
//! Field names match the CSV headers, so each record (de)serializes straight
//! through `csv` + `serde`.

use serde::{Deserialize, Serialize};

/// One row of the student list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Grade level
    pub grade: i32,
    /// Homeroom teacher
    #[serde(default)]
    pub teacher: String,
    /// Stream / track label
    #[serde(default)]
    pub stream: String,
}

/// One row of the class catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Catalog id
    pub id: String,
    /// Session number; only rows of the running session are loaded
    pub session: u32,
    /// Class name
    pub name: String,
    /// Interest area (must be a preference sheet column)
    pub interest_area: String,
    /// Lowest eligible grade
    pub grade_min: i32,
    /// Highest eligible grade
    pub grade_max: i32,
    /// Seats offered
    pub student_capacity_max: u32,
    /// Where the class meets
    #[serde(default)]
    pub location: String,
    /// Where students gather before class
    #[serde(default)]
    pub meet_location: String,
}

/// A trusted placement applied before the greedy pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAssignment {
    /// Catalog id of the target class
    #[serde(alias = "course_id")]
    pub class_id: String,
    /// Full name of the student
    #[serde(alias = "full_name")]
    pub student_full_name: String,
}

/// One student's answers from the sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    /// Full name as typed on the form
    pub full_name: String,
    /// `(area, raw label)` pairs in sheet column order
    pub answers: Vec<(String, String)>,
}

/// The parsed preference sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSheet {
    /// Every area named by the header, in column order
    pub areas: Vec<String>,
    /// One entry per form submission, in file order
    pub sign_ups: Vec<SignUp>,
}

/// A volunteer leading (or helping with) a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdultAssignment {
    /// Catalog id of the class
    pub class_id: String,
    /// Volunteer's full name
    pub full_name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Free-form note (e.g., "lead", "helper")
    #[serde(default)]
    pub note: String,
}

/// One row of `final_assignments.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Class name
    pub class_name: String,
    /// Session number
    pub class_session: u32,
    /// Catalog id
    pub class_id: String,
    /// Student full name
    pub student_full_name: String,
    /// Student grade
    pub student_grade: i32,
    /// Homeroom teacher
    pub student_teacher: String,
    /// Stream / track label
    pub student_stream: String,
    /// `VERY`, `MAYBE` or `NOPE` for the class the student landed in
    pub student_interest: String,
}

/// Everything one assignment run consumes
#[derive(Debug, Clone, Default)]
pub struct EngineInput {
    /// Sign-up answers and the area universe
    pub preferences: PreferenceSheet,
    /// Student list rows
    pub students: Vec<StudentRecord>,
    /// Catalog rows of every session
    pub courses: Vec<CourseRecord>,
    /// Trusted placements
    pub manual_assignments: Vec<ManualAssignment>,
    /// Sign-up names to discard before matching
    pub skip_list: Vec<String>,
}
