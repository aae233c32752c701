//! Report generation module for printed class rosters
//!
//! Joins the class catalog, the volunteer leaders and a finished assignment
//! into one record per class, then renders Markdown class lists and
//! teacher lists from embedded templates.

pub mod class_list;
pub mod teacher_list;

use crate::core::records::{AdultAssignment, AssignmentRecord, CourseRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub use class_list::ClassListReporter;
pub use teacher_list::TeacherListReporter;

/// Placeholder shown for a blank location
pub(crate) const UNKNOWN_LOCATION: &str = "TBD";

/// One class with everyone attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassData {
    /// Catalog id
    pub id: String,
    /// Class name
    pub name: String,
    /// Session number
    pub session: u32,
    /// Where the class meets
    pub location: String,
    /// Where students gather before class
    pub meet_location: String,
    /// Volunteer leaders
    pub adults: Vec<AdultAssignment>,
    /// Students on the roster
    pub students: Vec<AssignmentRecord>,
}

impl ClassData {
    fn from_catalog(record: &CourseRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            session: record.session,
            location: record.location.clone(),
            meet_location: record.meet_location.clone(),
            adults: Vec::new(),
            students: Vec::new(),
        }
    }

    /// A class that only appears in the assignment (the fallback class)
    fn from_assignment(record: &AssignmentRecord) -> Self {
        Self {
            id: record.class_id.clone(),
            name: record.class_name.clone(),
            session: record.class_session,
            location: String::new(),
            meet_location: String::new(),
            adults: Vec::new(),
            students: Vec::new(),
        }
    }

    /// Location, or a placeholder when blank
    #[must_use]
    pub fn location_or_default(&self) -> &str {
        non_blank(&self.location)
    }

    /// Meet location, or a placeholder when blank
    #[must_use]
    pub fn meet_location_or_default(&self) -> &str {
        non_blank(&self.meet_location)
    }
}

fn non_blank(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN_LOCATION
    } else {
        value
    }
}

/// Fill `{{name}}` placeholders in `template` in a single pass.
///
/// Substituted values are never rescanned, so data containing braces is
/// written as-is. Unknown placeholders are kept verbatim.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Data context for report generation
///
/// Classes are keyed (and therefore iterated) by id.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    classes: BTreeMap<String, ClassData>,
}

impl ReportContext {
    /// Join catalog rows, leaders and assignment rows by class id.
    ///
    /// Only catalog rows of sessions present in `assignments` are kept (all
    /// rows when `assignments` is empty). Leaders of unknown classes are
    /// dropped; students of a class missing from the catalog get a class of
    /// their own, which is how the fallback class shows up.
    #[must_use]
    pub fn new(
        catalog: &[CourseRecord],
        adults: &[AdultAssignment],
        assignments: &[AssignmentRecord],
    ) -> Self {
        let sessions: BTreeSet<u32> = assignments.iter().map(|a| a.class_session).collect();

        let mut classes: BTreeMap<String, ClassData> = catalog
            .iter()
            .filter(|record| sessions.is_empty() || sessions.contains(&record.session))
            .map(|record| (record.id.clone(), ClassData::from_catalog(record)))
            .collect();

        for adult in adults {
            if let Some(class) = classes.get_mut(&adult.class_id) {
                class.adults.push(adult.clone());
            }
        }

        for student in assignments {
            classes
                .entry(student.class_id.clone())
                .or_insert_with(|| ClassData::from_assignment(student))
                .students
                .push(student.clone());
        }

        Self { classes }
    }

    /// Classes sorted by id
    pub fn classes(&self) -> impl Iterator<Item = &ClassData> {
        self.classes.values()
    }

    /// Look up one class
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassData> {
        self.classes.get(id)
    }

    /// Number of classes
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of students across all classes
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.classes.values().map(|c| c.students.len()).sum()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// File name written inside the reports directory
    fn file_name(&self) -> &'static str;
}

/// Write every report into `output_dir`, creating it if needed
///
/// # Returns
/// Paths of the files written
///
/// # Errors
/// Returns an error if the directory cannot be created or a report fails
pub fn write_all(ctx: &ReportContext, output_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(output_dir)?;

    let reporters: [&dyn ReportGenerator; 2] = [&ClassListReporter, &TeacherListReporter];
    let mut written = Vec::with_capacity(reporters.len());
    for reporter in reporters {
        let path = output_dir.join(reporter.file_name());
        reporter.generate(ctx, &path)?;
        crate::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
