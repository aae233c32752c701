//! Final placement produced by an engine run

use crate::core::models::{Course, Student};
use crate::core::records::AssignmentRecord;
use std::collections::HashMap;
use std::fmt;

/// A soft condition that did not stop the run but needs operator review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The student never signed up and was given interest in every area
    MissingSignUp {
        /// Student full name
        student: String,
    },
    /// No class in any preference tier had room; the student went to the fallback class
    NoAvailableCourse {
        /// Student full name
        student: String,
        /// Student grade
        grade: i32,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSignUp { student } => {
                write!(f, "No preferences for {student}; treating as interested in every area")
            }
            Self::NoAvailableCourse { student, grade } => {
                write!(f, "No available class for {student} ({grade}); placed in Fallback")
            }
        }
    }
}

/// Every course with its roster and every student with their course
#[derive(Debug, Clone)]
pub struct Assignment {
    session: u32,
    courses: Vec<Course>,
    students: Vec<Student>,
    notices: Vec<Notice>,
}

impl Assignment {
    pub(super) const fn new(
        session: u32,
        courses: Vec<Course>,
        students: Vec<Student>,
        notices: Vec<Notice>,
    ) -> Self {
        Self {
            session,
            courses,
            students,
            notices,
        }
    }

    /// Session the run was for
    #[must_use]
    pub const fn session(&self) -> u32 {
        self.session
    }

    /// Courses, fallback first, then catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Students in the order they were processed (pickiest first)
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Soft conditions raised during the run
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Names of students who could not be placed in any real class
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::NoAvailableCourse { student, .. } => Some(student.as_str()),
            Notice::MissingSignUp { .. } => None,
        })
    }

    /// Names of students who never signed up and were given default preferences
    pub fn missing_sign_ups(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter_map(|notice| match notice {
            Notice::MissingSignUp { student } => Some(student.as_str()),
            Notice::NoAvailableCourse { .. } => None,
        })
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a student by full name
    #[must_use]
    pub fn student(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    /// The course a student landed in
    #[must_use]
    pub fn course_of(&self, name: &str) -> Option<&Course> {
        self.student(name)
            .and_then(Student::assigned_course)
            .and_then(|id| self.course(id))
    }

    /// One output row per student, by course order then roster order
    #[must_use]
    pub fn records(&self) -> Vec<AssignmentRecord> {
        let by_name: HashMap<&str, &Student> =
            self.students.iter().map(|s| (s.name.as_str(), s)).collect();
        let by_name = &by_name;

        self.courses
            .iter()
            .flat_map(move |course| {
                course
                    .roster()
                    .iter()
                    .filter_map(move |name| by_name.get(name.as_str()))
                    .map(move |student| AssignmentRecord {
                        class_name: course.name.clone(),
                        class_session: course.session,
                        class_id: course.id.clone(),
                        student_full_name: student.name.clone(),
                        student_grade: student.grade,
                        student_teacher: student.teacher.clone(),
                        student_stream: student.stream.clone(),
                        student_interest: student.interest_in(course).to_string(),
                    })
            })
            .collect()
    }
}
