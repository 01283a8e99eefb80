//! Result reconciliation
//!
//! Loads the expected test case list, writes the report with every case at
//! `NA`, then marks each case PASS or FAIL from an execution log.

mod cases;
mod report;
mod runner;

pub use cases::{Group, TestCases};
pub use report::{update_status, Report, ReportEntry, Status, StatusCounts};
pub use runner::{read_log, CaseResult, ReconcileOutcome, Reconciler};
