//! Integration tests for the class and teacher list reports

use sorting_hat::core::engine::{Engine, EngineOptions};
use sorting_hat::core::loader::{load_session_inputs, read_adult_assignments, read_courses};
use sorting_hat::core::records::AssignmentRecord;
use sorting_hat::core::report::{
    write_all, ClassListReporter, ReportContext, ReportGenerator, TeacherListReporter,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLES: &str = "samples/session";

fn sample_records() -> Vec<AssignmentRecord> {
    let input = load_session_inputs(Path::new(SAMPLES)).unwrap();
    Engine::with_options(
        input,
        EngineOptions {
            session: 1,
            seed: Some(99),
        },
    )
    .unwrap()
    .run()
    .records()
}

fn sample_context() -> ReportContext {
    let catalog = read_courses(Path::new(SAMPLES).join("class_catalog.csv")).unwrap();
    let adults =
        read_adult_assignments(Path::new(SAMPLES).join("adult_class_assignments.csv")).unwrap();
    ReportContext::new(&catalog, &adults, &sample_records())
}

#[test]
fn test_class_list_sections_follow_id_order() {
    let out = ClassListReporter::new().render(&sample_context()).unwrap();

    let positions: Vec<usize> = ["# S1-01", "# S1-02", "# S1-03", "# S1-04", "# S1-05"]
        .iter()
        .map(|heading| out.find(heading).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!out.contains("Chess Club"));
    assert!(!out.contains("{{"));
}

#[test]
fn test_class_list_leaders_case_insensitive() {
    let out = ClassListReporter::new().render(&sample_context()).unwrap();
    let pizza = &out[out.find("# S1-03").unwrap()..out.find("# S1-04").unwrap()];

    assert!(pizza.find("Alex Kim").unwrap() < pizza.find("sam Ortiz").unwrap());
}

#[test]
fn test_every_student_listed_once() {
    let ctx = sample_context();
    let out = TeacherListReporter::new().render(&ctx).unwrap();

    assert_eq!(ctx.student_count(), 12);
    for record in sample_records() {
        assert_eq!(
            out.matches(&format!("- {} (", record.student_full_name)).count(),
            1,
            "{}",
            record.student_full_name
        );
    }
}

#[test]
fn test_teacher_list_sorted() {
    let out = TeacherListReporter::new().render(&sample_context()).unwrap();

    let keating = out.find("# Mr. Keating").unwrap();
    let frizzle = out.find("# Ms. Frizzle").unwrap();
    let honey = out.find("# Ms. Honey").unwrap();
    assert!(keating < frizzle && frizzle < honey);
}

#[test]
fn test_write_all_to_directory() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("reports");

    let written = write_all(&sample_context(), &out_dir).unwrap();

    assert_eq!(written.len(), 2);
    let class_list = fs::read_to_string(out_dir.join("class_list.md")).unwrap();
    assert!(class_list.contains("**Location:** Garden"));
    let teacher_list = fs::read_to_string(out_dir.join("teacher_list.md")).unwrap();
    assert!(teacher_list.contains("# Ms. Honey"));
}
