//! Catalog of active-session courses indexed by interest area

use super::course::FALLBACK_COURSE_ID;
use super::Course;
use crate::core::error::SetupError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// Index of the fallback course in [`Catalog::courses`]
const FALLBACK_INDEX: usize = 0;

/// All courses of the running session plus the fallback course.
///
/// Courses keep their catalog order; the fallback course is always first and
/// is never reachable through an area lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    by_area: HashMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog for `session`.
    ///
    /// # Arguments
    /// * `session` - Session stamped on the fallback course
    /// * `courses` - Courses of the active session, in catalog order
    /// * `known_areas` - Areas discovered from the preference sheet header
    ///
    /// # Errors
    /// Returns [`SetupError::UnknownArea`] for a course outside `known_areas`,
    /// [`SetupError::ReservedCourseId`] for a course using the fallback id
    /// and [`SetupError::DuplicateCourse`] when two courses share an id.
    pub fn new(
        session: u32,
        courses: Vec<Course>,
        known_areas: &BTreeSet<String>,
    ) -> Result<Self, SetupError> {
        let mut catalog = Self {
            courses: vec![Course::fallback(session)],
            by_area: HashMap::new(),
            by_id: HashMap::new(),
        };
        catalog
            .by_id
            .insert(catalog.courses[FALLBACK_INDEX].id.clone(), FALLBACK_INDEX);

        for course in courses {
            if !known_areas.contains(&course.area) {
                return Err(SetupError::UnknownArea {
                    course_id: course.id,
                    course_name: course.name,
                    area: course.area,
                });
            }

            if course.id == FALLBACK_COURSE_ID {
                return Err(SetupError::ReservedCourseId(course.id));
            }

            let idx = catalog.courses.len();
            if catalog.by_id.insert(course.id.clone(), idx).is_some() {
                return Err(SetupError::DuplicateCourse(course.id));
            }
            catalog
                .by_area
                .entry(course.area.clone())
                .or_default()
                .push(idx);
            catalog.courses.push(course);
        }

        Ok(catalog)
    }

    /// Every course, fallback first, then catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Course at `idx`
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn course(&self, idx: usize) -> &Course {
        &self.courses[idx]
    }

    pub(crate) fn course_mut(&mut self, idx: usize) -> &mut Course {
        &mut self.courses[idx]
    }

    /// Index of the course with `id`
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.index_of(id).map(|idx| &self.courses[idx])
    }

    /// Index of the fallback course
    #[must_use]
    pub const fn fallback_index(&self) -> usize {
        FALLBACK_INDEX
    }

    /// The fallback course
    #[must_use]
    pub fn fallback(&self) -> &Course {
        &self.courses[FALLBACK_INDEX]
    }

    /// Candidate course indices for `area`, in their current order
    #[must_use]
    pub fn candidates(&self, area: &str) -> &[usize] {
        self.by_area.get(area).map_or(&[] as &[usize], Vec::as_slice)
    }

    /// Shuffle the candidate list for `area` in place and return it.
    ///
    /// Every lookup reshuffles, so parallel offerings of one area fill evenly
    /// instead of the first-listed course always filling first.
    pub fn shuffled_candidates<R: Rng + ?Sized>(&mut self, area: &str, rng: &mut R) -> Vec<usize> {
        self.by_area.get_mut(area).map_or_else(Vec::new, |list| {
            list.shuffle(rng);
            list.clone()
        })
    }

    /// Number of real (non-fallback) courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len() - 1
    }

    /// Whether the session offers no real courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the catalog, returning all courses in catalog order
    #[must_use]
    pub fn into_courses(self) -> Vec<Course> {
        self.courses
    }
}
