//! Assign command handler

use crate::commands::report;
use sorting_hat::config::Config;
use sorting_hat::core::engine::{Engine, EngineOptions};
use sorting_hat::core::export::export_assignments_csv;
use sorting_hat::core::loader::{load_session_inputs, FINAL_ASSIGNMENTS_FILE};
use sorting_hat::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Run one assignment over the configured data directory.
///
/// # Arguments
/// * `output` - Optional output file; defaults to `final_assignments.csv` in config `out_dir`
/// * `write_reports` - Also write class and teacher lists to config `reports_dir`
/// * `config` - Configuration with the session, seed and paths to use
///
/// # Errors
/// Returns a user-facing message if inputs fail to load or validate, or if
/// any output cannot be written. Nothing is written when validation fails.
pub fn run(
    output: Option<&Path>,
    write_reports: bool,
    config: &Config,
) -> Result<(), String> {
    let data_dir = PathBuf::from(&config.paths.data_dir);
    let input = load_session_inputs(&data_dir).map_err(|e| {
        error!("Failed to load inputs from {}: {e}", data_dir.display());
        format!("✗ {e}")
    })?;
    let catalog = write_reports.then(|| input.courses.clone());

    let options = EngineOptions {
        session: config.session.current,
        seed: config.session.seed,
    };
    if let Some(seed) = options.seed {
        info!("Using fixed seed {seed}");
    }

    let engine = Engine::with_options(input, options).map_err(|e| {
        error!("Assignment setup failed: {e}");
        format!("✗ {e}")
    })?;
    let assignment = engine.run();

    let output_path = output.map_or_else(
        || PathBuf::from(&config.paths.out_dir).join(FINAL_ASSIGNMENTS_FILE),
        Path::to_path_buf,
    );
    let summary = export_assignments_csv(&assignment, &output_path).map_err(|e| {
        error!("Failed to write {}: {e}", output_path.display());
        format!("✗ Failed to write {}: {e}", output_path.display())
    })?;

    println!(
        "✓ Wrote {} assignments to {}",
        summary.students,
        output_path.display()
    );
    print!("{summary}");

    for notice in assignment.notices() {
        verbose!("  ! {notice}");
    }
    let missing: Vec<&str> = assignment.missing_sign_ups().collect();
    if !missing.is_empty() {
        println!("! No sign-up from: {}", missing.join(", "));
    }
    let failures: Vec<&str> = assignment.failures().collect();
    if !failures.is_empty() {
        println!("✗ No class available for: {}", failures.join(", "));
    }

    if let Some(catalog) = catalog {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        report::write_reports(&catalog, &data_dir, &assignment.records(), &reports_dir)?;
    }

    Ok(())
}
