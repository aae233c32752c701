//! Course model

use super::Student;
use std::fmt;

/// Id of the catch-all course
pub const FALLBACK_COURSE_ID: &str = "fallback";

/// Area of the catch-all course; never a real interest area
pub const FALLBACK_AREA: &str = "none";

/// Capacity of the catch-all course
pub const FALLBACK_CAPACITY: i32 = 999;

/// Represents one class offering in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Catalog id (e.g., "S1-04")
    pub id: String,

    /// Class name (e.g., "Pizza Science")
    pub name: String,

    /// Session the class runs in
    pub session: u32,

    /// Interest area the class belongs to
    pub area: String,

    /// Lowest eligible grade (inclusive)
    pub grade_min: i32,

    /// Highest eligible grade (inclusive)
    pub grade_max: i32,

    /// Seats offered
    pub max_capacity: i32,

    /// Seats left; goes negative only through manual overrides
    pub remaining_capacity: i32,

    /// Where the class meets
    pub location: String,

    /// Where students gather before walking to the class
    pub meet_location: String,

    /// Names of the students placed here, in placement order
    roster: Vec<String>,
}

impl Course {
    /// Create a new course with an empty roster
    ///
    /// # Arguments
    /// * `id` - Catalog id
    /// * `name` - Class name
    /// * `session` - Session number
    /// * `area` - Interest area
    /// * `grade_min` / `grade_max` - Inclusive grade range
    /// * `max_capacity` - Seats offered
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        session: u32,
        area: impl Into<String>,
        grade_min: i32,
        grade_max: i32,
        max_capacity: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            session,
            area: area.into(),
            grade_min,
            grade_max,
            max_capacity,
            remaining_capacity: max_capacity,
            location: String::new(),
            meet_location: String::new(),
            roster: Vec::new(),
        }
    }

    /// The catch-all course that takes anyone no real course could fit
    #[must_use]
    pub fn fallback(session: u32) -> Self {
        Self::new(
            FALLBACK_COURSE_ID,
            "Fallback",
            session,
            FALLBACK_AREA,
            0,
            999,
            FALLBACK_CAPACITY,
        )
    }

    /// Set the meeting places shown on class lists
    #[must_use]
    pub fn with_locations(mut self, location: impl Into<String>, meet_location: impl Into<String>) -> Self {
        self.location = location.into();
        self.meet_location = meet_location.into();
        self
    }

    /// Whether this is the catch-all course
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_COURSE_ID
    }

    /// Whether the course has a free seat and admits the student's grade
    #[must_use]
    pub const fn available_to(&self, student: &Student) -> bool {
        self.remaining_capacity > 0
            && student.grade >= self.grade_min
            && student.grade <= self.grade_max
    }

    /// Place a student in this course.
    ///
    /// Does not check [`Course::available_to`]; callers decide whether the
    /// placement is allowed (manual overrides skip the check on purpose).
    pub fn assign(&mut self, student: &mut Student) {
        self.roster.push(student.name.clone());
        self.remaining_capacity -= 1;
        student.record_assignment(&self.id);
    }

    /// Names of placed students, in placement order
    #[must_use]
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Number of placed students
    #[must_use]
    pub fn enrolled(&self) -> usize {
        self.roster.len()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.area)
    }
}
