//! CLI command handling
//!
//! Resolves file locations, runs the reconciler and prints the summary.

use std::path::Path;

use colored::Colorize;

use crate::commands::Cli;
use crate::common::config::{ReportPaths, Settings};
use crate::common::{paths, Result};
use crate::reconcile::{ReconcileOutcome, Reconciler, Report, TestCases};

/// Run one reconciliation from parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;
    let resolved = ReportPaths::resolve(
        cli.config,
        cli.report,
        &settings,
        paths::env_workspace_root(),
    )?;
    tracing::debug!(
        config = %resolved.config.display(),
        report = %resolved.report.display(),
        "Resolved paths"
    );

    run_with_paths(&resolved, &cli.log)
}

/// Initialize the report, reconcile it against the log and summarize
///
/// Returns `Error::SetupFailed` when a setup test case is missing from the
/// log, after the summary has been printed.
pub fn run_with_paths(paths: &ReportPaths, log: &Path) -> Result<()> {
    let cases = TestCases::load(&paths.config)?;
    tracing::info!(
        setup = cases.setup.len(),
        e2e = cases.e2e.len(),
        "Loaded test cases"
    );
    if cases.is_empty() {
        tracing::warn!(config = %paths.config.display(), "No test cases listed");
    }

    Report::initialize(&paths.report, &cases)?;

    let outcome = Reconciler::new(&cases, paths.report.clone()).reconcile(log)?;
    print_summary(&paths.report, &outcome);

    outcome.into_result().map(|_| ())
}

fn print_summary(report_path: &Path, outcome: &ReconcileOutcome) {
    for result in outcome.update_errors() {
        if let Some(reason) = &result.update_error {
            println!("  {} {}", "!".yellow(), reason);
        }
    }

    // Read back so the counts reflect what actually landed on disk
    match Report::load(report_path) {
        Ok(report) => {
            let counts = report.counts();
            println!(
                "\n{} {} passed, {} failed, {} not run ({} total)",
                "Summary:".bold(),
                counts.pass.to_string().green(),
                counts.fail.to_string().red(),
                counts.na.to_string().dimmed(),
                counts.total()
            );
        }
        Err(e) => tracing::warn!(error = %e, "Could not read back report"),
    }
    println!("Report: {}", report_path.display());
}
