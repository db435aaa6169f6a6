use clap::Parser;
use std::path::PathBuf;

/// Run a bank operation script and print the account summaries
#[derive(Parser, Debug)]
#[command(name = "corebank")]
#[command(about = "Run a bank operation script and print the account summaries", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the operation script
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parses_input_path() {
        let parsed = CliArgs::try_parse_from(["program", "operations.csv"]).unwrap();
        assert_eq!(parsed.input_file, Path::new("operations.csv"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = CliArgs::try_parse_from(["program"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_positional_is_an_error() {
        let result = CliArgs::try_parse_from(["program", "a.csv", "b.csv"]);
        assert!(result.is_err());
    }
}
