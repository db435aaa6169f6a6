//! Corebank CLI
//!
//! Command-line interface for running bank operation scripts from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! ```
//!
//! The program reads operations from the input CSV file, applies them to a
//! fresh bank engine in order, and writes the final account summaries to
//! stdout. Malformed rows and rejected operations are reported on stderr
//! and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, output not writable)

use corebank::cli;
use corebank::io::process_script;
use std::process;

fn main() {
    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = process_script(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
