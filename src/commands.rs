//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "e2e-report",
    about = "Mark expected e2e test cases PASS or FAIL from an execution log"
)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Path of the test list file created during e2e execution
    pub log: PathBuf,

    /// Test case configuration (JSON with "setup" and "e2e" lists)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report file to write
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}
