//! Integration tests for the CSV loaders and the assignment export

use sorting_hat::core::engine::{Engine, EngineOptions};
use sorting_hat::core::error::LoadError;
use sorting_hat::core::export::{export_assignments_csv, AssignmentSummary};
use sorting_hat::core::loader::{
    load_session_inputs, read_adult_assignments, read_assignment_records, read_preference_sheet,
    CATALOG_FILE, FINAL_ASSIGNMENTS_FILE, PREFERENCES_FILE, STUDENTS_FILE,
};
use sorting_hat::core::models::Interest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLES: &str = "samples/session";

#[test]
fn test_load_sample_session() {
    let input = load_session_inputs(Path::new(SAMPLES)).expect("samples load");

    assert_eq!(
        input.preferences.areas,
        vec!["science_nature", "cooking", "arts_crafts", "sports_games"]
    );
    assert_eq!(input.preferences.sign_ups.len(), 12);
    assert_eq!(input.students.len(), 12);
    assert_eq!(input.courses.len(), 7);
    assert_eq!(input.manual_assignments.len(), 1);
    assert_eq!(input.skip_list, vec!["Test Submission"]);

    let ruby = input
        .preferences
        .sign_ups
        .iter()
        .find(|s| s.full_name == "Ruby Adams")
        .unwrap();
    assert_eq!(ruby.answers[2], ("arts_crafts".to_string(), String::new()));
}

#[test]
fn test_optional_files_may_be_absent() {
    let dir = TempDir::new().unwrap();
    for file in [PREFERENCES_FILE, STUDENTS_FILE, CATALOG_FILE] {
        fs::copy(Path::new(SAMPLES).join(file), dir.path().join(file)).unwrap();
    }

    let input = load_session_inputs(dir.path()).expect("required files only");
    assert!(input.manual_assignments.is_empty());
    assert!(input.skip_list.is_empty());
}

#[test]
fn test_missing_required_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        Path::new(SAMPLES).join(PREFERENCES_FILE),
        dir.path().join(PREFERENCES_FILE),
    )
    .unwrap();

    let err = load_session_inputs(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains(STUDENTS_FILE));
}

#[test]
fn test_interest_prefix_variants() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PREFERENCES_FILE);
    fs::write(
        &path,
        "full_name,interest_cooking,student_interest_sports\nAda Lovelace,Interested,Very Interested\n",
    )
    .unwrap();

    let sheet = read_preference_sheet(&path).unwrap();
    assert_eq!(sheet.areas, vec!["cooking", "sports"]);
    assert_eq!(sheet.sign_ups[0].full_name, "Ada Lovelace");
}

#[test]
fn test_bad_grade_is_a_csv_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(STUDENTS_FILE),
        "first_name,last_name,grade,teacher,stream\nAda,Lovelace,four,Ms. Honey,English\n",
    )
    .unwrap();
    for file in [PREFERENCES_FILE, CATALOG_FILE] {
        fs::copy(Path::new(SAMPLES).join(file), dir.path().join(file)).unwrap();
    }

    assert!(matches!(
        load_session_inputs(dir.path()),
        Err(LoadError::Csv { .. })
    ));
}

#[test]
fn test_adult_assignments() {
    let adults =
        read_adult_assignments(Path::new(SAMPLES).join("adult_class_assignments.csv")).unwrap();
    assert_eq!(adults.len(), 7);
    assert_eq!(adults[0].class_id, "S1-01");
    assert_eq!(adults[0].note, "lead");
}

#[test]
fn test_export_then_read_back() {
    let input = load_session_inputs(Path::new(SAMPLES)).unwrap();
    let assignment = Engine::with_options(
        input,
        EngineOptions {
            session: 1,
            seed: Some(7),
        },
    )
    .unwrap()
    .run();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join(FINAL_ASSIGNMENTS_FILE);
    let summary = export_assignments_csv(&assignment, &path).unwrap();

    let rows = read_assignment_records(&path).unwrap();
    assert_eq!(rows, assignment.records());
    assert_eq!(summary.students, rows.len());
    assert_eq!(
        summary.count(Interest::Very)
            + summary.count(Interest::Maybe)
            + summary.count(Interest::Nope)
            + summary.fallback,
        rows.len()
    );
    assert_eq!(summary.missing_sign_ups, 1);
}

#[test]
fn test_summary_display() {
    let input = load_session_inputs(Path::new(SAMPLES)).unwrap();
    let assignment = Engine::with_options(
        input,
        EngineOptions {
            session: 1,
            seed: Some(8),
        },
    )
    .unwrap()
    .run();

    let summary = AssignmentSummary::from_assignment(&assignment);
    let text = summary.to_string();

    assert!(text.starts_with("Session 1: 12 students in 5 classes"));
    assert!(text.contains("VERY"));
    assert!(text.contains("Missing sign-ups 1"));
}
