//! Markdown teacher list: for each homeroom teacher, where their students go

use crate::core::records::AssignmentRecord;
use crate::core::report::{fill_template, ClassData, ReportContext, ReportGenerator};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write;

/// Embedded per-teacher section template
const TEACHER_TEMPLATE: &str = include_str!("templates/teacher_list.md");

/// Heading used for students with a blank teacher column
const NO_TEACHER: &str = "No teacher listed";

/// Teacher list generator
pub struct TeacherListReporter;

/// One teacher's students, grouped by class id
type TeacherClasses<'a> = BTreeMap<&'a str, (&'a ClassData, Vec<&'a AssignmentRecord>)>;

impl TeacherListReporter {
    /// Create a new teacher list reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn group_by_teacher(ctx: &ReportContext) -> BTreeMap<&str, TeacherClasses<'_>> {
        let mut teachers: BTreeMap<&str, TeacherClasses<'_>> = BTreeMap::new();
        for class in ctx.classes() {
            for student in &class.students {
                let teacher = match student.student_teacher.trim() {
                    "" => NO_TEACHER,
                    name => name,
                };
                teachers
                    .entry(teacher)
                    .or_default()
                    .entry(class.id.as_str())
                    .or_insert_with(|| (class, Vec::new()))
                    .1
                    .push(student);
            }
        }
        teachers
    }

    fn render_teacher(teacher: &str, classes: &mut TeacherClasses<'_>) -> String {
        let mut body = String::new();
        let mut student_count = 0;

        for (class, students) in classes.values_mut() {
            students.sort_by_cached_key(|s| s.student_full_name.to_lowercase());
            student_count += students.len();

            let _ = writeln!(body, "## {}", class.name);
            let _ = writeln!(
                body,
                "\nLocation: {} · Meet at: {}\n",
                class.location_or_default(),
                class.meet_location_or_default()
            );
            for s in students.iter() {
                let _ = writeln!(body, "- {} ({})", s.student_full_name, s.student_grade);
            }
            body.push('\n');
        }

        fill_template(
            TEACHER_TEMPLATE,
            &[
                ("teacher", teacher),
                ("student_count", &student_count.to_string()),
                ("class_count", &classes.len().to_string()),
                ("classes", &body),
            ],
        )
    }
}

impl Default for TeacherListReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TeacherListReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut teachers = Self::group_by_teacher(ctx);
        Ok(teachers
            .iter_mut()
            .map(|(teacher, classes)| Self::render_teacher(teacher, classes))
            .collect())
    }

    fn file_name(&self) -> &'static str {
        "teacher_list.md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::tests::{course, row};

    fn context() -> ReportContext {
        ReportContext::new(
            &[
                course("S1-02", 1, "Pizza", "Kitchen"),
                course("S1-01", 1, "Bug Hunt", "Garden"),
            ],
            &[],
            &[
                row("S1-02", "bea Young", 4, "Keating"),
                row("S1-01", "Zed Adams", 3, "Keating"),
                row("S1-02", "Al Brown", 4, "Keating"),
                row("S1-01", "Cy Dunn", 2, "Frizzle"),
                row("S1-01", "Di Evans", 2, ""),
            ],
        )
    }

    #[test]
    fn test_teachers_sorted_with_counts() {
        let out = TeacherListReporter::new().render(&context()).unwrap();

        let frizzle = out.find("# Frizzle").unwrap();
        let keating = out.find("# Keating").unwrap();
        let none = out.find(&format!("# {NO_TEACHER}")).unwrap();
        assert!(frizzle < keating && keating < none);
        assert!(out.contains("3 students in 2 classes"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_classes_by_id_students_by_name() {
        let out = TeacherListReporter::new().render(&context()).unwrap();
        let keating = &out[out.find("# Keating").unwrap()..];

        let bugs = keating.find("## Bug Hunt").unwrap();
        let pizza = keating.find("## Pizza").unwrap();
        assert!(bugs < pizza);
        assert!(keating.find("Al Brown").unwrap() < keating.find("bea Young").unwrap());
        assert!(keating.contains("Location: Kitchen"));
    }
}
