//! Export assignment results

use crate::core::engine::Assignment;
use crate::core::models::Interest;
use crate::core::records::AssignmentRecord;
use crate::debug;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

/// Trait for writing an assignment in different formats
pub trait AssignmentExporter {
    /// Export a finished assignment
    ///
    /// # Errors
    /// Returns an error if export fails
    fn export(&self, assignment: &Assignment, output_path: &Path) -> Result<(), Box<dyn Error>>;
}

/// Seats taken in one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFill {
    /// Catalog id
    pub id: String,
    /// Class name
    pub name: String,
    /// Students on the roster
    pub enrolled: usize,
    /// Seats offered
    pub capacity: i32,
}

impl CourseFill {
    /// True when manual placements pushed the roster past capacity
    #[must_use]
    pub fn is_over_capacity(&self) -> bool {
        i64::try_from(self.enrolled).unwrap_or(i64::MAX) > i64::from(self.capacity)
    }
}

/// Summary statistics for one run
#[derive(Debug, Clone)]
pub struct AssignmentSummary {
    /// Session the run was for
    pub session: u32,
    /// Students placed (including the fallback class)
    pub students: usize,
    /// Students per interest level of the class they landed in, indexed by [`Interest::index`]
    pub by_interest: [usize; 3],
    /// Students in the fallback class
    pub fallback: usize,
    /// Students who never signed up
    pub missing_sign_ups: usize,
    /// Per-class fill, catalog order, fallback excluded
    pub fill: Vec<CourseFill>,
}

impl AssignmentSummary {
    /// Compute summary statistics from a finished assignment
    #[must_use]
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let mut by_interest = [0; 3];
        let mut fallback = 0;

        for student in assignment.students() {
            let Some(course) = student
                .assigned_course()
                .and_then(|id| assignment.course(id))
            else {
                continue;
            };
            if course.is_fallback() {
                fallback += 1;
            } else {
                by_interest[student.interest_in(course).index()] += 1;
            }
        }

        let fill = assignment
            .courses()
            .iter()
            .filter(|course| !course.is_fallback())
            .map(|course| CourseFill {
                id: course.id.clone(),
                name: course.name.clone(),
                enrolled: course.enrolled(),
                capacity: course.max_capacity,
            })
            .collect();

        let missing_sign_ups = assignment.missing_sign_ups().count();

        Self {
            session: assignment.session(),
            students: assignment.students().len(),
            by_interest,
            fallback,
            missing_sign_ups,
            fill,
        }
    }

    /// Students whose class matched the given interest level
    #[must_use]
    pub const fn count(&self, level: Interest) -> usize {
        self.by_interest[level.index()]
    }
}

impl fmt::Display for AssignmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Session {}: {} students in {} classes",
            self.session,
            self.students,
            self.fill.len()
        )?;
        for level in Interest::ALL {
            writeln!(f, "  {level:<5} {}", self.count(level))?;
        }
        writeln!(f, "  Fallback {}", self.fallback)?;
        if self.missing_sign_ups > 0 {
            writeln!(f, "  Missing sign-ups {}", self.missing_sign_ups)?;
        }
        for course in self.fill.iter().filter(|c| c.is_over_capacity()) {
            writeln!(
                f,
                "  Over capacity: {} ({}) {}/{}",
                course.name, course.id, course.enrolled, course.capacity
            )?;
        }
        Ok(())
    }
}

/// CSV exporter writing `final_assignments.csv`
pub struct CsvExporter;

impl AssignmentExporter for CsvExporter {
    fn export(&self, assignment: &Assignment, output_path: &Path) -> Result<(), Box<dyn Error>> {
        write_records_csv(&assignment.records(), output_path)
    }
}

/// Write assignment rows with a header line
///
/// Parent directories are created as needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written
pub fn write_records_csv(records: &[AssignmentRecord], output_path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(output_path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!("Wrote {} assignment rows to {}", records.len(), output_path.display());
    Ok(())
}

/// Convenience function to export with the default CSV exporter
///
/// Returns the computed summary statistics for further use
///
/// # Errors
/// Returns an error if file writing fails
pub fn export_assignments_csv<P: AsRef<Path>>(
    assignment: &Assignment,
    output_path: P,
) -> Result<AssignmentSummary, Box<dyn Error>> {
    CsvExporter.export(assignment, output_path.as_ref())?;
    Ok(AssignmentSummary::from_assignment(assignment))
}
