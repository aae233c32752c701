//! Markdown class list: one section per class with its leaders and students
//!
//! Meant to be printed and handed to each class leader.

use crate::core::records::{AdultAssignment, AssignmentRecord};
use crate::core::report::{fill_template, ClassData, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded per-class section template
const CLASS_TEMPLATE: &str = include_str!("templates/class_list.md");

/// Class list generator
pub struct ClassListReporter;

impl ClassListReporter {
    /// Create a new class list reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_class(class: &ClassData) -> String {
        let mut adults: Vec<&AdultAssignment> = class.adults.iter().collect();
        adults.sort_by_key(|a| a.full_name.to_lowercase());

        let mut students: Vec<&AssignmentRecord> = class.students.iter().collect();
        students.sort_by_cached_key(|s| (s.student_grade, first_name(&s.student_full_name)));

        fill_template(
            CLASS_TEMPLATE,
            &[
                ("class_id", &class.id),
                ("class_name", &class.name),
                ("session", &class.session.to_string()),
                ("location", class.location_or_default()),
                ("meet_location", class.meet_location_or_default()),
                ("leaders", &Self::leaders_list(&adults)),
                ("student_count", &students.len().to_string()),
                ("students", &Self::students_table(&students)),
            ],
        )
    }

    fn leaders_list(adults: &[&AdultAssignment]) -> String {
        if adults.is_empty() {
            return "_No leaders assigned_".to_string();
        }

        let mut list = String::new();
        for adult in adults {
            let _ = write!(list, "- {}", adult.full_name);
            if !adult.email.is_empty() {
                let _ = write!(list, " <{}>", adult.email);
            }
            if !adult.note.is_empty() {
                let _ = write!(list, " ({})", adult.note);
            }
            list.push('\n');
        }
        list
    }

    fn students_table(students: &[&AssignmentRecord]) -> String {
        if students.is_empty() {
            return "_No students_".to_string();
        }

        let mut table = String::new();
        table.push_str("| Student | Grade | Teacher | Stream |\n");
        table.push_str("|---|---|---|---|\n");
        for s in students {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                s.student_full_name, s.student_grade, s.student_teacher, s.student_stream
            );
        }
        table
    }
}

/// Lowercased first word of a full name
fn first_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

impl Default for ClassListReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for ClassListReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(ctx.classes().map(Self::render_class).collect())
    }

    fn file_name(&self) -> &'static str {
        "class_list.md"
    }
}
