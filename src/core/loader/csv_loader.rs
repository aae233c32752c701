//! CSV parsing for sign-ups, the student list, the catalog and the side files

use super::{
    CATALOG_FILE, MANUAL_ASSIGNMENTS_FILE, PREFERENCES_FILE, SKIP_LIST_FILE, STUDENTS_FILE,
};
use crate::core::error::LoadError;
use crate::core::records::{
    AdultAssignment, AssignmentRecord, CourseRecord, EngineInput, ManualAssignment,
    PreferenceSheet, SignUp, StudentRecord,
};
use crate::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header prefixes that mark an interest-area column, longest first
const INTEREST_PREFIXES: [&str; 2] = ["student_interest_", "interest_"];

/// Headers accepted for the sign-up name column
const NAME_COLUMNS: [&str; 2] = ["student_full_name", "full_name"];

/// Extract the area id from a preference sheet header
///
/// `student_interest_arts_crafts` → `arts_crafts`; non-area columns give `None`.
#[must_use]
pub fn interest_area(column: &str) -> Option<&str> {
    INTEREST_PREFIXES
        .iter()
        .find_map(|prefix| column.strip_prefix(prefix))
        .filter(|area| !area.is_empty())
}

/// Read every input the engine needs from `data_dir`.
///
/// The manual-assignment and skip-list files are optional and read as empty
/// when absent.
///
/// # Errors
/// Returns an error if a required file is missing or any file is malformed.
pub fn load_session_inputs(data_dir: &Path) -> Result<EngineInput, LoadError> {
    let input = EngineInput {
        preferences: read_preference_sheet(data_dir.join(PREFERENCES_FILE))?,
        students: read_students(data_dir.join(STUDENTS_FILE))?,
        courses: read_courses(data_dir.join(CATALOG_FILE))?,
        manual_assignments: read_manual_assignments(data_dir.join(MANUAL_ASSIGNMENTS_FILE))?,
        skip_list: read_skip_list(data_dir.join(SKIP_LIST_FILE))?,
    };

    info!(
        "Loaded {} sign-ups, {} students, {} catalog rows, {} manual assignments, {} skip-list names from {}",
        input.preferences.sign_ups.len(),
        input.students.len(),
        input.courses.len(),
        input.manual_assignments.len(),
        input.skip_list.len(),
        data_dir.display()
    );
    Ok(input)
}

/// Parse the sign-up sheet.
///
/// The header defines the universe of areas: every `student_interest_<area>`
/// (or `interest_<area>`) column is one area.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid CSV, or has no
/// name column.
pub fn read_preference_sheet<P: AsRef<Path>>(path: P) -> Result<PreferenceSheet, LoadError> {
    let path = path.as_ref();
    preference_sheet_from_reader(open(path)?, path)
}

/// Parse the student list
///
/// # Errors
/// Returns an error if the file cannot be read or a row does not decode.
pub fn read_students<P: AsRef<Path>>(path: P) -> Result<Vec<StudentRecord>, LoadError> {
    let path = path.as_ref();
    rows_from_reader(open(path)?, path)
}

/// Parse the class catalog (all sessions)
///
/// # Errors
/// Returns an error if the file cannot be read, a row does not decode, or a
/// row's grade range is empty.
pub fn read_courses<P: AsRef<Path>>(path: P) -> Result<Vec<CourseRecord>, LoadError> {
    let path = path.as_ref();
    courses_from_reader(open(path)?, path)
}

/// Parse manual assignments; a missing file means none
///
/// # Errors
/// Returns an error if the file exists but cannot be read or decoded.
pub fn read_manual_assignments<P: AsRef<Path>>(path: P) -> Result<Vec<ManualAssignment>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No manual assignments at {}", path.display());
        return Ok(Vec::new());
    }
    rows_from_reader(open(path)?, path)
}

#[derive(Debug, Deserialize)]
struct SkipRow {
    #[serde(alias = "full_name")]
    student_full_name: String,
}

/// Parse the skip list; a missing file means nobody is skipped
///
/// # Errors
/// Returns an error if the file exists but cannot be read or decoded.
pub fn read_skip_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No skip list at {}", path.display());
        return Ok(Vec::new());
    }
    let rows: Vec<SkipRow> = rows_from_reader(open(path)?, path)?;
    Ok(rows
        .into_iter()
        .map(|row| row.student_full_name)
        .filter(|name| !name.is_empty())
        .collect())
}

/// Parse volunteer class leaders; a missing file means none
///
/// # Errors
/// Returns an error if the file exists but cannot be read or decoded.
pub fn read_adult_assignments<P: AsRef<Path>>(path: P) -> Result<Vec<AdultAssignment>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No adult assignments at {}", path.display());
        return Ok(Vec::new());
    }
    rows_from_reader(open(path)?, path)
}

/// Parse a previously exported `final_assignments.csv`
///
/// # Errors
/// Returns an error if the file cannot be read or a row does not decode.
pub fn read_assignment_records<P: AsRef<Path>>(path: P) -> Result<Vec<AssignmentRecord>, LoadError> {
    let path = path.as_ref();
    rows_from_reader(open(path)?, path)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn rows_from_reader<T: DeserializeOwned, R: Read>(reader: R, path: &Path) -> Result<Vec<T>, LoadError> {
    csv_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| LoadError::csv(path, e))
}

fn courses_from_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<CourseRecord>, LoadError> {
    let courses: Vec<CourseRecord> = rows_from_reader(reader, path)?;
    for (idx, course) in courses.iter().enumerate() {
        if course.grade_min > course.grade_max {
            return Err(LoadError::InvalidField {
                path: path.to_path_buf(),
                row: idx + 1,
                field: "grade_min".to_string(),
                value: format!("{} (grade_max {})", course.grade_min, course.grade_max),
            });
        }
    }
    Ok(courses)
}

fn preference_sheet_from_reader<R: Read>(reader: R, path: &Path) -> Result<PreferenceSheet, LoadError> {
    let mut reader = csv_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| LoadError::csv(path, e))?
        .clone();

    let name_idx = headers
        .iter()
        .position(|h| NAME_COLUMNS.iter().any(|name| h.eq_ignore_ascii_case(name)))
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: NAME_COLUMNS[0].to_string(),
        })?;

    let area_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| interest_area(h).map(|area| (idx, area.to_string())))
        .collect();

    let mut sign_ups = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::csv(path, e))?;
        let full_name = record.get(name_idx).unwrap_or_default().trim();
        if full_name.is_empty() {
            continue;
        }

        let answers = area_columns
            .iter()
            .map(|(idx, area)| {
                (
                    area.clone(),
                    record.get(*idx).unwrap_or_default().to_string(),
                )
            })
            .collect();
        sign_ups.push(SignUp {
            full_name: full_name.to_string(),
            answers,
        });
    }

    Ok(PreferenceSheet {
        areas: area_columns.into_iter().map(|(_, area)| area).collect(),
        sign_ups,
    })
}
