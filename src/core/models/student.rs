//! Student model

use super::{Course, Interest, Preference};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A student waiting to be placed in a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Full name (`"{first} {last}"`), unique across the student list
    pub name: String,

    /// Grade level (e.g. 3 for third grade)
    pub grade: i32,

    /// Homeroom teacher
    pub teacher: String,

    /// Stream / track label
    pub stream: String,

    /// Preferences in the order fixed by [`Student::set_preferences`]
    preferences: Vec<Preference>,

    /// Indices into `preferences`, one bucket per [`Interest`] level
    buckets: [Vec<usize>; 3],

    /// Id of the course this student landed in
    assigned_course: Option<String>,
}

impl Student {
    /// Create a student with no preferences and no course
    ///
    /// # Arguments
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `grade` - Grade level
    /// * `teacher` - Homeroom teacher
    /// * `stream` - Stream / track label
    #[must_use]
    pub fn new(
        first_name: &str,
        last_name: &str,
        grade: i32,
        teacher: impl Into<String>,
        stream: impl Into<String>,
    ) -> Self {
        Self {
            name: full_name(first_name, last_name),
            grade,
            teacher: teacher.into(),
            stream: stream.into(),
            preferences: Vec::new(),
            buckets: [Vec::new(), Vec::new(), Vec::new()],
            assigned_course: None,
        }
    }

    /// Shuffle `preferences`, store them and bucket them by level.
    ///
    /// The shuffle is the only tie-break between areas the student rated the
    /// same, so each student gets a fresh random order within every level.
    pub fn set_preferences<R: Rng + ?Sized>(&mut self, mut preferences: Vec<Preference>, rng: &mut R) {
        preferences.shuffle(rng);

        let mut buckets: [Vec<usize>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for (idx, pref) in preferences.iter().enumerate() {
            buckets[pref.level().index()].push(idx);
        }

        self.preferences = preferences;
        self.buckets = buckets;
    }

    /// Preferences in stored (shuffled) order
    #[must_use]
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Number of areas at each level: `(very, maybe, nope)`
    #[must_use]
    pub fn preference_counts(&self) -> (usize, usize, usize) {
        (
            self.buckets[0].len(),
            self.buckets[1].len(),
            self.buckets[2].len(),
        )
    }

    /// The student's search order: every VERY area, then MAYBE, then NOPE
    #[must_use]
    pub fn ordered_preferences(&self) -> Vec<&Preference> {
        self.buckets
            .iter()
            .flatten()
            .map(|&idx| &self.preferences[idx])
            .collect()
    }

    /// Interest level the student gave to the area of `course`
    #[must_use]
    pub fn interest_in(&self, course: &Course) -> Interest {
        self.preferences
            .iter()
            .find(|pref| pref.area() == course.area)
            .map_or(Interest::Nope, Preference::level)
    }

    /// Id of the assigned course, if any
    #[must_use]
    pub fn assigned_course(&self) -> Option<&str> {
        self.assigned_course.as_deref()
    }

    /// Whether the student already has a course
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned_course.is_some()
    }

    /// Record the back-reference to the course that took this student
    pub(crate) fn record_assignment(&mut self, course_id: &str) {
        debug_assert!(
            self.assigned_course.is_none(),
            "{} is already assigned",
            self.name
        );
        self.assigned_course = Some(course_id.to_string());
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.grade)
    }
}

/// Join first and last name the way sign-up sheets spell them
#[must_use]
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}
