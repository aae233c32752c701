//! Integration tests for the assignment engine

use rand::rngs::StdRng;
use rand::SeedableRng;
use sorting_hat::core::engine::{Assignment, Engine, EngineOptions, Notice, Stage};
use sorting_hat::core::error::SetupError;
use sorting_hat::core::loader::load_session_inputs;
use sorting_hat::core::models::course::FALLBACK_COURSE_ID;
use sorting_hat::core::models::Interest;
use sorting_hat::core::records::{
    CourseRecord, EngineInput, ManualAssignment, PreferenceSheet, SignUp, StudentRecord,
};
use std::collections::HashSet;
use std::path::Path;

fn sample_input() -> EngineInput {
    load_session_inputs(Path::new("samples/session")).expect("sample inputs load")
}

fn run_seeded(input: EngineInput, seed: u64) -> Assignment {
    Engine::with_options(
        input,
        EngineOptions {
            session: 1,
            seed: Some(seed),
        },
    )
    .expect("valid input")
    .run()
}

fn course(id: &str, area: &str, grades: (i32, i32), capacity: u32) -> CourseRecord {
    CourseRecord {
        id: id.to_string(),
        session: 1,
        name: format!("Course {id}"),
        interest_area: area.to_string(),
        grade_min: grades.0,
        grade_max: grades.1,
        student_capacity_max: capacity,
        location: String::new(),
        meet_location: String::new(),
    }
}

fn student(first: &str, last: &str, grade: i32) -> StudentRecord {
    StudentRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        grade,
        teacher: "Ms. Honey".to_string(),
        stream: "English".to_string(),
    }
}

fn very(full_name: &str, area: &str) -> SignUp {
    SignUp {
        full_name: full_name.to_string(),
        answers: vec![(area.to_string(), "Very Interested".to_string())],
    }
}

/// Two one-seat science classes and three fourth graders who only want science
fn science_input() -> EngineInput {
    EngineInput {
        preferences: PreferenceSheet {
            areas: vec!["science".to_string()],
            sign_ups: vec![
                very("Ann Lee", "science"),
                very("Ben Lee", "science"),
                very("Cat Lee", "science"),
            ],
        },
        students: vec![
            student("Ann", "Lee", 4),
            student("Ben", "Lee", 4),
            student("Cat", "Lee", 4),
        ],
        courses: vec![
            course("SCI-1", "science", (3, 6), 1),
            course("SCI-2", "science", (3, 6), 1),
        ],
        manual_assignments: Vec::new(),
        skip_list: Vec::new(),
    }
}

#[test]
fn test_science_scenario_two_seats_three_students() {
    for seed in 0..20 {
        let result = run_seeded(science_input(), seed);

        assert_eq!(result.course("SCI-1").unwrap().enrolled(), 1);
        assert_eq!(result.course("SCI-2").unwrap().enrolled(), 1);
        assert_eq!(result.course(FALLBACK_COURSE_ID).unwrap().enrolled(), 1);

        let failures: Vec<&str> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            result.course_of(failures[0]).map(|c| c.id.as_str()),
            Some(FALLBACK_COURSE_ID)
        );
    }
}

#[test]
fn test_unknown_area_aborts_before_placement() {
    let mut input = science_input();
    input.courses.push(course("ROB-1", "robotics", (0, 6), 10));

    let err = Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap_err();
    assert_eq!(
        err,
        SetupError::UnknownArea {
            course_id: "ROB-1".to_string(),
            course_name: "Course ROB-1".to_string(),
            area: "robotics".to_string(),
        }
    );
    assert!(err.to_string().contains("robotics"));
}

#[test]
fn test_capacity_invariant() {
    let input = sample_input();
    let manual: HashSet<String> = input
        .manual_assignments
        .iter()
        .map(|m| m.class_id.clone())
        .collect();

    let result = run_seeded(input, 11);
    for course in result.courses() {
        let enrolled = i32::try_from(course.enrolled()).unwrap();
        assert_eq!(course.remaining_capacity, course.max_capacity - enrolled);
        if !manual.contains(&course.id) {
            assert!(course.remaining_capacity >= 0, "{} overfilled", course.id);
        }
    }
}

#[test]
fn test_grade_eligibility() {
    let input = sample_input();
    let manual: HashSet<String> = input
        .manual_assignments
        .iter()
        .map(|m| m.student_full_name.clone())
        .collect();

    let result = run_seeded(input, 12);
    for student in result.students() {
        if manual.contains(&student.name) {
            continue;
        }
        let course = result.course_of(&student.name).unwrap();
        assert!(
            (course.grade_min..=course.grade_max).contains(&student.grade),
            "{student} placed in {course}"
        );
    }
}

#[test]
fn test_totality() {
    let input = sample_input();
    let roster_names: Vec<String> = input
        .students
        .iter()
        .map(|s| format!("{} {}", s.first_name, s.last_name))
        .collect();

    let result = run_seeded(input, 13);

    let mut seen = HashSet::new();
    for course in result.courses() {
        for name in course.roster() {
            assert!(seen.insert(name.clone()), "{name} placed twice");
        }
    }
    assert_eq!(seen.len(), roster_names.len());
    for name in &roster_names {
        assert!(seen.contains(name), "{name} not placed");
        assert!(result.student(name).unwrap().is_assigned());
    }
}

#[test]
fn test_preference_completeness() {
    let input = sample_input();
    let areas = input.preferences.areas.len();

    let engine = Engine::new(input, 1, StdRng::seed_from_u64(14)).unwrap();
    assert_eq!(engine.stage(), Stage::Unordered);
    for student in engine.students() {
        assert_eq!(student.preferences().len(), areas, "{student}");
        let (v, m, n) = student.preference_counts();
        assert_eq!(v + m + n, areas);
    }
}

#[test]
fn test_missing_sign_up_is_a_notice() {
    let result = run_seeded(sample_input(), 15);

    assert!(result.notices().contains(&Notice::MissingSignUp {
        student: "Noah Park".to_string()
    }));
    assert_eq!(
        result.student("Noah Park").unwrap().preference_counts(),
        (4, 0, 0)
    );
    assert_eq!(result.missing_sign_ups().collect::<Vec<_>>(), vec!["Noah Park"]);
}

#[test]
fn test_manual_assignment_precedence() {
    let result = run_seeded(sample_input(), 16);
    assert_eq!(
        result.course_of("Finn Walsh").map(|c| c.id.as_str()),
        Some("S1-05")
    );
}

#[test]
fn test_manual_assignment_ignores_capacity_and_grade() {
    let mut input = science_input();
    input.students.push(student("Kid", "Young", 1));
    input.preferences.sign_ups.push(very("Kid Young", "science"));
    input.manual_assignments = vec![
        ManualAssignment {
            class_id: "SCI-1".to_string(),
            student_full_name: "Ann Lee".to_string(),
        },
        ManualAssignment {
            class_id: "SCI-1".to_string(),
            student_full_name: "Kid Young".to_string(),
        },
    ];

    let result = run_seeded(input, 17);
    let sci = result.course("SCI-1").unwrap();
    assert_eq!(sci.enrolled(), 2);
    assert_eq!(sci.remaining_capacity, -1);
    assert_eq!(result.course_of("Kid Young").map(|c| c.id.as_str()), Some("SCI-1"));
}

#[test]
fn test_fallback_saturation() {
    let mut input = science_input();
    input.students.push(student("Dee", "Lee", 4));
    input.preferences.sign_ups.push(very("Dee Lee", "science"));

    let result = run_seeded(input, 18);

    let fallback = result.course(FALLBACK_COURSE_ID).unwrap();
    assert_eq!(fallback.enrolled(), 2);
    for name in fallback.roster() {
        let student = result.student(name).unwrap();
        assert!(result
            .courses()
            .iter()
            .filter(|c| !c.is_fallback())
            .all(|c| !c.available_to(student)));
    }
    assert_eq!(result.failures().count(), 2);
}

#[test]
fn test_same_seed_same_rosters() {
    let first = run_seeded(sample_input(), 2024);
    let second = run_seeded(sample_input(), 2024);

    assert_eq!(first.records(), second.records());
}

#[test]
fn test_other_session_courses_are_not_used() {
    let result = run_seeded(sample_input(), 19);

    assert!(result.course("S2-01").is_none());
    assert!(result.courses().iter().all(|c| c.session == 1));
}

#[test]
fn test_skip_listed_sign_up_is_discarded() {
    let input = sample_input();
    assert!(input
        .preferences
        .sign_ups
        .iter()
        .any(|s| s.full_name == "Test Submission"));

    let result = run_seeded(input, 20);
    assert!(result.student("Test Submission").is_none());
}

#[test]
fn test_unmatched_sign_ups_are_fatal() {
    let mut input = science_input();
    input.preferences.sign_ups.push(very("Zed Nobody", "science"));
    input.preferences.sign_ups.push(very("Yan Nobody", "science"));

    let err = Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap_err();
    assert_eq!(
        err,
        SetupError::UnmatchedSignUps(vec!["Zed Nobody".to_string(), "Yan Nobody".to_string()])
    );
}

#[test]
fn test_skip_listed_roster_student_is_fatal() {
    let mut input = science_input();
    input.skip_list = vec!["Ann Lee".to_string()];

    assert_eq!(
        Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap_err(),
        SetupError::SkipListedStudent("Ann Lee".to_string())
    );
}

#[test]
fn test_duplicate_student_is_fatal() {
    let mut input = science_input();
    input.students.push(student(" Ann", "Lee ", 5));

    assert_eq!(
        Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap_err(),
        SetupError::DuplicateStudent("Ann Lee".to_string())
    );
}

#[test]
fn test_two_manual_rows_for_one_student_are_fatal() {
    let mut input = science_input();
    input.manual_assignments = ["SCI-1", "SCI-2"]
        .iter()
        .map(|id| ManualAssignment {
            class_id: (*id).to_string(),
            student_full_name: "Ann Lee".to_string(),
        })
        .collect();

    assert_eq!(
        Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap_err(),
        SetupError::DuplicateManualAssignment("Ann Lee".to_string())
    );
}

#[test]
fn test_later_sign_up_replaces_earlier() {
    let mut input = science_input();
    input.preferences.areas.push("cooking".to_string());
    input.preferences.sign_ups.push(very("Ann Lee", "cooking"));

    let engine = Engine::new(input, 1, StdRng::seed_from_u64(0)).unwrap();
    let ann = engine.students().iter().find(|s| s.name == "Ann Lee").unwrap();

    assert_eq!(ann.preference_counts(), (1, 0, 1));
    assert_eq!(ann.ordered_preferences()[0].area(), "cooking");
}

#[test]
fn test_manual_assignment_unknown_ids_are_fatal() {
    let mut input = science_input();
    input.manual_assignments = vec![ManualAssignment {
        class_id: "NOPE-1".to_string(),
        student_full_name: "Ann Lee".to_string(),
    }];
    assert!(matches!(
        Engine::new(input, 1, StdRng::seed_from_u64(0)),
        Err(SetupError::UnknownCourse { .. })
    ));

    let mut input = science_input();
    input.manual_assignments = vec![ManualAssignment {
        class_id: "SCI-1".to_string(),
        student_full_name: "Ghost Lee".to_string(),
    }];
    assert!(matches!(
        Engine::new(input, 1, StdRng::seed_from_u64(0)),
        Err(SetupError::UnknownStudent { .. })
    ));
}

#[test]
fn test_records_report_interest_of_landed_class() {
    let result = run_seeded(science_input(), 21);

    for record in result.records() {
        let expected = if record.class_id == FALLBACK_COURSE_ID {
            Interest::Nope
        } else {
            Interest::Very
        };
        assert_eq!(record.student_interest, expected.to_string());
    }
}
