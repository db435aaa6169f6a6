//! I/O module
//!
//! Handles script parsing, the processing pipeline, and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, output serialization)
//! - `script_reader` - Streaming CSV reader with iterator interface

pub mod csv_format;
pub mod script_reader;

pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord};
pub use script_reader::ScriptReader;

use crate::core::BankEngine;
use crate::types::BankError;
use std::io::Write;
use std::path::Path;

/// Run a whole operation script and write the account summaries
///
/// Streams the script row by row through a fresh [`BankEngine`]. Malformed
/// rows and rejected operations are reported on stderr and skipped; the
/// run carries on with the next row.
///
/// # Errors
///
/// Returns `Io` only for failures that make the run impossible: the script
/// file cannot be opened, or the output cannot be written.
pub fn process_script(input: &Path, output: &mut dyn Write) -> Result<(), BankError> {
    let reader = ScriptReader::new(input)?;
    let mut engine = BankEngine::new();

    for row in reader {
        match row {
            Ok(operation) => {
                if let Err(e) = engine.apply(operation) {
                    eprintln!("Skipping operation: {}", e);
                }
            }
            Err(e) => eprintln!("Skipping row: {}", e),
        }
    }

    let accounts = engine.accounts();
    write_accounts_csv(&accounts, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_process_script_end_to_end() {
        let content = "op,customer,id,to,amount,detail,rate,months\n\
            open_savings,CUST-1,ACC-1,,500.00,,0.04,\n\
            open_savings,CUST-2,ACC-2,,200.00,,0.04,\n\
            transfer,,ACC-1,ACC-2,100.00,,,\n";
        let file = create_temp_csv(content);

        let mut output = Vec::new();
        process_script(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,customer,kind,balance,active\n\
             ACC-1,CUST-1,Savings,400.00,true\n\
             ACC-2,CUST-2,Savings,300.00,true\n"
        );
    }

    #[test]
    fn test_process_script_skips_bad_rows_and_rejected_operations() {
        let content = "op,customer,id,to,amount,detail,rate,months\n\
            open_savings,CUST-1,ACC-1,,100.00,,0.04,\n\
            explode,,,,,,,\n\
            withdraw,,ACC-1,,100.01,,,\n\
            deposit,,ACC-1,,25.00,,,\n";
        let file = create_temp_csv(content);

        let mut output = Vec::new();
        process_script(file.path(), &mut output).unwrap();

        assert!(String::from_utf8(output)
            .unwrap()
            .contains("ACC-1,CUST-1,Savings,125.00,true"));
    }

    #[test]
    fn test_process_script_propagates_missing_input() {
        let mut output = Vec::new();
        let result = process_script(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(BankError::Io { .. })));
    }
}
