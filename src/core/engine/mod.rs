//! Greedy assignment engine
//!
//! This module places every student in exactly one class:
//! 1. Applies manual (trusted) placements, bypassing capacity and grade checks
//! 2. Sorts students pickiest-first (fewest VERY-interested areas first)
//! 3. Walks each remaining student's preferences VERY → MAYBE → NOPE and takes
//!    the first class with a free seat for their grade, reshuffling parallel
//!    offerings of an area on every lookup
//! 4. Sends anyone left over to the fallback class and reports it
//!
//! The result is a first-fit heuristic, not a global optimum.

mod ingest;
mod outcome;

pub use outcome::{Assignment, Notice};

use crate::core::error::SetupError;
use crate::core::models::{Catalog, Student};
use crate::core::records::EngineInput;
use crate::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Where a run is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Inputs validated, nobody placed
    Unordered,
    /// Manual placements applied
    ManuallySeeded,
    /// Students in pickiest-first order
    Sorted,
    /// Greedy pass complete
    GreedilyAssigned,
    /// Every student has a class
    Final,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unordered => "unordered",
            Self::ManuallySeeded => "manually seeded",
            Self::Sorted => "sorted",
            Self::GreedilyAssigned => "greedily assigned",
            Self::Final => "final",
        };
        f.write_str(name)
    }
}

/// Run parameters that do not come from the input files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    /// Only catalog rows of this session are eligible
    pub session: u32,
    /// Fixed random seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

/// Assignment run over one student population
#[derive(Debug)]
pub struct Engine<R: Rng = StdRng> {
    students: Vec<Student>,
    catalog: Catalog,
    manual: Vec<(usize, usize)>,
    notices: Vec<Notice>,
    session: u32,
    stage: Stage,
    rng: R,
}

impl Engine<StdRng> {
    /// Build an engine seeded from `options`.
    ///
    /// # Errors
    /// Returns a [`SetupError`] for any fatal input problem.
    pub fn with_options(input: EngineInput, options: EngineOptions) -> Result<Self, SetupError> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::new(input, options.session, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Validate the input and build students and catalog.
    ///
    /// Preferences are shuffled here, using `rng`, so the same generator
    /// state reproduces the same run.
    ///
    /// # Errors
    /// Returns a [`SetupError`] naming the offending course, area, student or
    /// id. No student has been placed when this fails.
    pub fn new(input: EngineInput, session: u32, mut rng: R) -> Result<Self, SetupError> {
        let ingested = ingest::ingest(input, session, &mut rng)?;
        Ok(Self {
            students: ingested.students,
            catalog: ingested.catalog,
            manual: ingested.manual,
            notices: ingested.notices,
            session,
            stage: Stage::Unordered,
            rng,
        })
    }

    /// Current stage
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Students in their current processing order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// The catalog with its current rosters
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Soft notices raised so far
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Run every remaining stage and hand back the final placement
    #[must_use]
    pub fn run(mut self) -> Assignment {
        info!(
            "Assigning {} students to {} courses",
            self.students.len(),
            self.catalog.courses().len()
        );

        self.seed_manual();
        self.sort_students();
        self.place_students();
        self.advance(Stage::Final);

        Assignment::new(
            self.session,
            self.catalog.into_courses(),
            self.students,
            self.notices,
        )
    }

    fn advance(&mut self, stage: Stage) {
        debug_assert!(stage > self.stage, "stage {stage} after {}", self.stage);
        self.stage = stage;
        info!("Assignment stage: {stage}");
    }

    /// Apply trusted placements without capacity or grade checks
    fn seed_manual(&mut self) {
        for &(course_idx, student_idx) in &self.manual {
            let course = self.catalog.course_mut(course_idx);
            course.assign(&mut self.students[student_idx]);
            debug!(
                "Manually assigning {} to {course}",
                self.students[student_idx]
            );
        }
        self.advance(Stage::ManuallySeeded);
    }

    /// Pickiest first; the sort is stable, equal counts keep list order
    fn sort_students(&mut self) {
        self.students.sort_by_key(Student::preference_counts);
        self.advance(Stage::Sorted);
    }

    fn place_students(&mut self) {
        for idx in 0..self.students.len() {
            if self.students[idx].is_assigned() {
                continue;
            }

            let course_idx = self.first_fit(idx).unwrap_or_else(|| {
                let notice = Notice::NoAvailableCourse {
                    student: self.students[idx].name.clone(),
                    grade: self.students[idx].grade,
                };
                crate::warn!("{notice}");
                self.notices.push(notice);
                let fallback = self.catalog.fallback_index();
                self.catalog
                    .course_mut(fallback)
                    .assign(&mut self.students[idx]);
                fallback
            });
            debug!(
                "Assigning {} to {}",
                self.students[idx],
                self.catalog.course(course_idx)
            );
        }
        self.advance(Stage::GreedilyAssigned);
    }

    /// Place student `idx` in the first open class of their search order
    fn first_fit(&mut self, idx: usize) -> Option<usize> {
        let areas: Vec<String> = self.students[idx]
            .ordered_preferences()
            .into_iter()
            .map(|pref| pref.area().to_string())
            .collect();

        for area in &areas {
            for course_idx in self.catalog.shuffled_candidates(area, &mut self.rng) {
                if self.catalog.course(course_idx).available_to(&self.students[idx]) {
                    self.catalog
                        .course_mut(course_idx)
                        .assign(&mut self.students[idx]);
                    return Some(course_idx);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Interest;
    use crate::core::records::{CourseRecord, ManualAssignment, PreferenceSheet, SignUp, StudentRecord};

    fn course(id: &str, area: &str, grades: (i32, i32), capacity: u32) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            session: 1,
            name: format!("{area} {id}"),
            interest_area: area.to_string(),
            grade_min: grades.0,
            grade_max: grades.1,
            student_capacity_max: capacity,
            location: String::new(),
            meet_location: String::new(),
        }
    }

    fn student(first: &str, grade: i32) -> StudentRecord {
        StudentRecord {
            first_name: first.to_string(),
            last_name: "Student".to_string(),
            grade,
            teacher: "Ms. Frizzle".to_string(),
            stream: "English".to_string(),
        }
    }

    fn sign_up(first: &str, answers: &[(&str, &str)]) -> SignUp {
        SignUp {
            full_name: format!("{first} Student"),
            answers: answers
                .iter()
                .map(|(a, l)| ((*a).to_string(), (*l).to_string()))
                .collect(),
        }
    }

    fn science_input() -> EngineInput {
        EngineInput {
            preferences: PreferenceSheet {
                areas: vec!["science".to_string(), "cooking".to_string()],
                sign_ups: ["Ann", "Ben", "Cat"]
                    .iter()
                    .map(|n| sign_up(n, &[("science", "Very Interested")]))
                    .collect(),
            },
            students: vec![student("Ann", 4), student("Ben", 4), student("Cat", 4)],
            courses: vec![
                course("S1", "science", (3, 6), 1),
                course("S2", "science", (3, 6), 1),
            ],
            manual_assignments: Vec::new(),
            skip_list: Vec::new(),
        }
    }

    #[test]
    fn test_two_seats_three_students() {
        let engine = Engine::new(science_input(), 1, StdRng::seed_from_u64(1)).unwrap();
        let result = engine.run();

        assert_eq!(result.course("S1").unwrap().enrolled(), 1);
        assert_eq!(result.course("S2").unwrap().enrolled(), 1);
        assert_eq!(result.course("fallback").unwrap().enrolled(), 1);
        assert_eq!(result.failures().count(), 1);
        assert!(result.students().iter().all(Student::is_assigned));
    }

    #[test]
    fn test_stage_starts_unordered() {
        let engine = Engine::new(science_input(), 1, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(engine.stage(), Stage::Unordered);
        assert!(engine.students().iter().all(|s| !s.is_assigned()));
        assert_eq!(engine.catalog().len(), 2);
    }

    #[test]
    fn test_other_session_is_ignored() {
        let mut input = science_input();
        input.courses.push(CourseRecord {
            session: 2,
            ..course("S9", "science", (3, 6), 10)
        });

        let result = Engine::new(input, 1, StdRng::seed_from_u64(2)).unwrap().run();
        assert!(result.course("S9").is_none());
        assert_eq!(result.failures().count(), 1);
    }

    #[test]
    fn test_manual_assignment_overrides_capacity_and_grade() {
        let mut input = science_input();
        input.students.push(student("Dan", 9));
        input.preferences.sign_ups.push(sign_up("Dan", &[("cooking", "Very Interested")]));
        input.manual_assignments = vec![
            ManualAssignment {
                class_id: "S1".to_string(),
                student_full_name: "Ann Student".to_string(),
            },
            ManualAssignment {
                class_id: "S1".to_string(),
                student_full_name: "Dan Student".to_string(),
            },
        ];

        let result = Engine::new(input, 1, StdRng::seed_from_u64(3)).unwrap().run();
        let s1 = result.course("S1").unwrap();

        assert_eq!(s1.roster(), ["Ann Student".to_string(), "Dan Student".to_string()]);
        assert_eq!(s1.remaining_capacity, -1);
        assert_eq!(result.course_of("Dan Student").map(|c| c.id.as_str()), Some("S1"));
        assert_eq!(result.course("S2").unwrap().enrolled(), 1);
        assert_eq!(result.course("fallback").unwrap().enrolled(), 1);
    }

    #[test]
    fn test_missing_sign_up_gets_every_area() {
        let mut input = science_input();
        input.students.push(student("Eve", 5));

        let engine = Engine::new(input, 1, StdRng::seed_from_u64(4)).unwrap();
        let eve = engine
            .students()
            .iter()
            .find(|s| s.name == "Eve Student")
            .unwrap();

        assert_eq!(eve.preference_counts(), (2, 0, 0));
        assert_eq!(
            engine.notices(),
            &[Notice::MissingSignUp {
                student: "Eve Student".to_string()
            }]
        );
    }

    #[test]
    fn test_unanswered_areas_default_to_nope() {
        let engine = Engine::new(science_input(), 1, StdRng::seed_from_u64(5)).unwrap();
        for s in engine.students() {
            let levels: Vec<Interest> = s.ordered_preferences().iter().map(|p| p.level()).collect();
            assert_eq!(levels, vec![Interest::Very, Interest::Nope]);
        }
    }

    #[test]
    fn test_pickiest_students_go_first() {
        let mut input = science_input();
        input.preferences.sign_ups[0] = sign_up(
            "Ann",
            &[("science", "Very Interested"), ("cooking", "Very Interested")],
        );

        let engine = Engine::new(input, 1, StdRng::seed_from_u64(6)).unwrap();
        let result = engine.run();
        let order: Vec<&str> = result.students().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["Ben Student", "Cat Student", "Ann Student"]);
    }
}
