//! Error types for loading inputs and setting up an assignment run

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems found while building an assignment run.
///
/// Every variant is raised before any student is placed, so a failed run
/// never produces partial output. Messages name the offending record so the
/// input data can be corrected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// A course row cites an area that is not a column of the preference sheet
    #[error("Unexpected interest area ({area}) for course {course_id} ({course_name})")]
    UnknownArea {
        /// Course id from the catalog
        course_id: String,
        /// Course display name
        course_name: String,
        /// The unrecognized area
        area: String,
    },

    /// Two active-session catalog rows share the same id
    #[error("Duplicate course id '{0}' in the active session")]
    DuplicateCourse(String),

    /// A catalog row uses the id reserved for the fallback course
    #[error("Course '{0}' uses the id reserved for the fallback course")]
    ReservedCourseId(String),

    /// Two student list rows produce the same full name
    #[error("Duplicate student '{0}' in the student list")]
    DuplicateStudent(String),

    /// Sign-ups that match no student record and are not on the skip list
    #[error("Sign-ups with no matching student record: {}", .0.join(", "))]
    UnmatchedSignUps(Vec<String>),

    /// A skip-listed name also matches a student on the roster
    #[error("Skip list excludes '{0}', who is on the student list")]
    SkipListedStudent(String),

    /// A manual assignment references a course id missing from the active session
    #[error("Manual assignment for '{student}' references unknown course id '{course_id}'")]
    UnknownCourse {
        /// Unresolved course id
        course_id: String,
        /// Student named on the same row
        student: String,
    },

    /// A manual assignment references a student missing from the student list
    #[error("Manual assignment to course '{course_id}' references unknown student '{student}'")]
    UnknownStudent {
        /// Course id named on the same row
        course_id: String,
        /// Unresolved student name
        student: String,
    },

    /// A student appears on more than one manual assignment row
    #[error("Student '{0}' has more than one manual assignment")]
    DuplicateManualAssignment(String),
}

/// Failures reading or decoding an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid CSV or a row does not match the expected columns
    #[error("Failed to parse {}: {source}", path.display())]
    Csv {
        /// File being parsed
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// A required header is absent
    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn {
        /// File being parsed
        path: PathBuf,
        /// Expected header
        column: String,
    },

    /// A field decoded but holds a value the model rejects
    #[error("{} row {row}: invalid {field} '{value}'", path.display())]
    InvalidField {
        /// File being parsed
        path: PathBuf,
        /// 1-based data row number (header excluded)
        row: usize,
        /// Column name
        field: String,
        /// Offending raw value
        value: String,
    },
}

impl LoadError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
