//! e2e-report - mark expected end-to-end test cases from an execution log
//!
//! Writes a report with every expected test case at NA, then marks each one
//! PASS or FAIL depending on whether it appears in the given log.

use clap::Parser;
use e2e_report::{cli, commands::Cli, common::logging};

fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
