//! Streaming CSV reader over operation scripts
//!
//! Yields one typed [`Operation`] per script row without loading the file
//! into memory. Row-level failures come out as `Err` items so the caller
//! can skip them and keep reading.

use crate::core::Operation;
use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::BankError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming operation script reader
///
/// Implements `Iterator`, yielding `Result<Operation, BankError>` per row.
#[derive(Debug)]
pub struct ScriptReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl ScriptReader {
    /// Open a script file for streaming iteration
    ///
    /// The CSV reader trims whitespace from all fields, allows rows with
    /// trailing columns omitted, and reads through an 8KB buffer.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened; reaching the file at all
    /// is fatal for the run, unlike per-row failures.
    pub fn new(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path).map_err(|e| BankError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }

    /// Stamp the current line number on parse errors that lack one
    fn at_line(&self, error: BankError) -> BankError {
        match error {
            BankError::Parse {
                line: None,
                message,
            } => BankError::Parse {
                // +1 for the header row
                line: Some(self.line_num + 1),
                message,
            },
            other => other,
        }
    }
}

impl Iterator for ScriptReader {
    type Item = Result<Operation, BankError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<CsvRecord>();

        match rows.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(convert_csv_record(record).map_err(|e| self.at_line(e)))
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(self.at_line(e.into())))
            }
        }
    }
}
