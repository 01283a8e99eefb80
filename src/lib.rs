//! e2e-report - reconcile end-to-end test logs against the expected cases
//!
//! This library loads the expected test case list, maintains the
//! PASS/FAIL/NA report and reconciles it against an execution log.

pub mod cli;
pub mod commands;
pub mod common;
pub mod reconcile;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use reconcile::{Reconciler, Report, Status, TestCases};
