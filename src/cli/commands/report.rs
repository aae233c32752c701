//! Report command handler
//!
//! Builds Markdown class lists and teacher lists from a finished assignment.

use sorting_hat::config::Config;
use sorting_hat::core::loader::{
    read_adult_assignments, read_assignment_records, read_courses, ADULT_ASSIGNMENTS_FILE,
    CATALOG_FILE, FINAL_ASSIGNMENTS_FILE,
};
use sorting_hat::core::records::{AssignmentRecord, CourseRecord};
use sorting_hat::core::report::{self, ReportContext};
use sorting_hat::{error, info};
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `assignments` - Optional assignment CSV; defaults to `final_assignments.csv` in config `out_dir`
/// * `output_dir` - Optional output directory; defaults to config `reports_dir`
/// * `config` - Configuration with the data directory and default paths
///
/// # Errors
/// Returns a user-facing message if an input cannot be read or a report
/// cannot be written.
pub fn run(
    assignments: Option<&Path>,
    output_dir: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let data_dir = PathBuf::from(&config.paths.data_dir);
    let assignments_path = assignments.map_or_else(
        || PathBuf::from(&config.paths.out_dir).join(FINAL_ASSIGNMENTS_FILE),
        Path::to_path_buf,
    );
    let output_dir =
        output_dir.map_or_else(|| PathBuf::from(&config.paths.reports_dir), Path::to_path_buf);

    let records = read_assignment_records(&assignments_path).map_err(|e| {
        error!("Failed to load assignments: {e}");
        format!("✗ {e}")
    })?;
    info!(
        "Loaded {} assignment rows from {}",
        records.len(),
        assignments_path.display()
    );

    let catalog = read_courses(data_dir.join(CATALOG_FILE)).map_err(|e| {
        error!("Failed to load catalog: {e}");
        format!("✗ {e}")
    })?;

    write_reports(&catalog, &data_dir, &records, &output_dir)
}

/// Join the catalog, adult assignments and assignment rows and write every report.
///
/// # Errors
/// Returns a user-facing message if the adult assignments cannot be read or a
/// report cannot be written.
pub fn write_reports(
    catalog: &[CourseRecord],
    data_dir: &Path,
    records: &[AssignmentRecord],
    output_dir: &Path,
) -> Result<(), String> {
    let adults = read_adult_assignments(data_dir.join(ADULT_ASSIGNMENTS_FILE)).map_err(|e| {
        error!("Failed to load adult assignments: {e}");
        format!("✗ {e}")
    })?;

    let ctx = ReportContext::new(catalog, &adults, records);
    let written = report::write_all(&ctx, output_dir).map_err(|e| {
        error!("Report generation failed: {e}");
        format!("✗ Failed to write reports to {}: {e}", output_dir.display())
    })?;

    for path in written {
        println!("✓ Report generated: {}", path.display());
    }
    Ok(())
}
