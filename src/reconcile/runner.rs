//! Reconciliation of an execution log against the expected test cases
//!
//! A test case passes when its identifier occurs anywhere in the log. This
//! is plain substring search over the whole log with line breaks removed, so
//! an identifier that is part of a longer one, or that shows up in unrelated
//! text, also counts as found.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::common::{Error, Result};

use super::cases::{Group, TestCases};
use super::report::{update_status, Status};

/// Result for one evaluated test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub identifier: String,
    pub group: Group,
    pub status: Status,
    /// Why the report line couldn't be rewritten, if it couldn't
    pub update_error: Option<String>,
}

/// Result of a reconciliation pass
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Evaluated test cases, in processing order
    pub results: Vec<CaseResult>,
    /// First setup test case missing from the log; processing stopped there
    pub setup_failure: Option<String>,
}

impl ReconcileOutcome {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.status == Status::Pass).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.status == Status::Fail).count()
    }

    /// Test cases whose report line couldn't be rewritten
    pub fn update_errors(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| r.update_error.is_some())
    }

    /// Convert a setup failure into the run's error
    pub fn into_result(self) -> Result<Self> {
        match self.setup_failure {
            Some(identifier) => Err(Error::SetupFailed { identifier }),
            None => Ok(self),
        }
    }
}

/// Read an execution log as one searchable string, line breaks removed
///
/// Invalid UTF-8 is replaced rather than rejected; only substring presence
/// matters.
pub fn read_log(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    Ok(collapse_lines(&String::from_utf8_lossy(&bytes)))
}

fn collapse_lines(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Marks the report's test cases from an execution log
pub struct Reconciler<'a> {
    cases: &'a TestCases,
    report_path: PathBuf,
}

impl<'a> Reconciler<'a> {
    pub fn new(cases: &'a TestCases, report_path: impl Into<PathBuf>) -> Self {
        Self {
            cases,
            report_path: report_path.into(),
        }
    }

    /// Mark every expected test case PASS or FAIL according to the log
    ///
    /// Stops at the first setup test case missing from the log; everything
    /// after it keeps its current status. An unreadable log is an error; a
    /// report line that can't be rewritten is only recorded.
    pub fn reconcile(&self, log_path: &Path) -> Result<ReconcileOutcome> {
        let log = read_log(log_path)?;
        tracing::debug!(
            log = %log_path.display(),
            bytes = log.len(),
            "Loaded execution log"
        );

        let mut outcome = ReconcileOutcome::default();

        println!("\n{}", "Setup:".cyan());
        for id in &self.cases.setup {
            let result = self.mark(id, Group::Setup, &log);
            let missing = result.status == Status::Fail;
            outcome.results.push(result);

            if missing {
                tracing::error!(identifier = %id, "Setup test case missing from execution log");
                println!(
                    "  {}",
                    "Setup part failed. Test cases may not have executed".red().bold()
                );
                outcome.setup_failure = Some(id.clone());
                return Ok(outcome);
            }
        }

        println!("\n{}", "E2E:".cyan());
        for id in &self.cases.e2e {
            let result = self.mark(id, Group::E2e, &log);
            outcome.results.push(result);
        }

        Ok(outcome)
    }

    /// Judge one test case and rewrite its report line
    fn mark(&self, identifier: &str, group: Group, log: &str) -> CaseResult {
        let status = if log.contains(identifier) {
            println!("  {} Found {}", "✓".green(), identifier);
            Status::Pass
        } else {
            println!("  {} Not able to find {}", "✗".red(), identifier.bold());
            Status::Fail
        };

        let update_error = match update_status(&self.report_path, identifier, status) {
            Ok(()) => {
                tracing::debug!(%group, identifier, %status, "Report updated");
                None
            }
            Err(e) => {
                tracing::warn!(%group, identifier, error = %e, "Report update failed");
                Some(e.to_string())
            }
        };

        CaseResult {
            identifier: identifier.to_string(),
            group,
            status,
            update_error,
        }
    }
}
