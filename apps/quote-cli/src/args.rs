//! # Argument Parsing
//!
//! ```text
//! liftquote <system> <floors> [--customer NAME --project NAME] [--json] [--db PATH]
//! ```
//!
//! Parsing only checks the shape of the command line. System type and floor
//! count stay raw text here and are validated by `QuoteRequest::parse`, so
//! the user sees the same rejection reasons as every other front-end.

use std::path::PathBuf;

use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
Usage: liftquote <system> <floors> [OPTIONS]

Arguments:
  <system>              hydraulic | gearless
  <floors>              whole number, 1 to 100

Options:
      --customer <NAME>  Customer name (saves the invoice, needs --project)
      --project <NAME>   Project name (saves the invoice, needs --customer)
      --json             Print the invoice as JSON
  -d, --db <PATH>        Database file (default: $LIFTQUOTE_DB_PATH or ./liftquote.db)
  -h, --help             Show this help message";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quote(QuoteArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteArgs {
    pub system: String,
    pub floors: String,
    /// `(customer, project)`; both or neither.
    pub party: Option<(String, String)>,
    pub json: bool,
    pub db_path: Option<PathBuf>,
}

/// Parses arguments, excluding the program name.
pub fn parse<I>(args: I) -> CliResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut customer = None;
    let mut project = None;
    let mut json = false;
    let mut db_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--json" => json = true,
            "--customer" => customer = Some(value_for(&arg, args.next())?),
            "--project" => project = Some(value_for(&arg, args.next())?),
            "--db" | "-d" => db_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option '{flag}'")));
            }
            _ => positional.push(arg),
        }
    }

    let party = match (customer, project) {
        (Some(customer), Some(project)) => Some((customer, project)),
        (None, None) => None,
        _ => {
            return Err(CliError::Usage(
                "--customer and --project must be given together".to_string(),
            ))
        }
    };

    let mut positional = positional.into_iter();
    let (system, floors) = match (positional.next(), positional.next(), positional.next()) {
        (Some(system), Some(floors), None) => (system, floors),
        (_, _, Some(extra)) => {
            return Err(CliError::Usage(format!("unexpected argument '{extra}'")));
        }
        _ => {
            return Err(CliError::Usage(
                "expected a system type and a floor count".to_string(),
            ))
        }
    };

    Ok(Command::Quote(QuoteArgs {
        system,
        floors,
        party,
        json,
        db_path,
    }))
}

fn value_for(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(line: &str) -> CliResult<Command> {
        parse(line.split_whitespace().map(String::from))
    }

    #[test]
    fn test_minimal_quote() {
        let cmd = parse_str("hydraulic 9").unwrap();
        assert_eq!(
            cmd,
            Command::Quote(QuoteArgs {
                system: "hydraulic".to_string(),
                floors: "9".to_string(),
                party: None,
                json: false,
                db_path: None,
            })
        );
    }

    #[test]
    fn test_all_options() {
        let cmd = parse_str("--json gearless 12 --customer Sara --project Tower -d /tmp/q.db").unwrap();
        let Command::Quote(args) = cmd else {
            panic!("expected a quote command");
        };
        assert!(args.json);
        assert_eq!(args.party, Some(("Sara".to_string(), "Tower".to_string())));
        assert_eq!(args.db_path, Some(PathBuf::from("/tmp/q.db")));
        assert_eq!(args.floors, "12");
    }

    #[test]
    fn test_values_are_not_validated_here() {
        // rejection happens in QuoteRequest::parse
        assert!(parse_str("common 0").is_ok());
        assert!(parse_str("gearless -3").is_ok());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_str("hydraulic --help").unwrap(), Command::Help);
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(parse_str("hydraulic"), Err(CliError::Usage(_))));
        assert!(matches!(parse_str("hydraulic 5 6"), Err(CliError::Usage(_))));
        assert!(matches!(parse_str("hydraulic 5 --customer Sara"), Err(CliError::Usage(_))));
        assert!(matches!(parse_str("hydraulic 5 --db"), Err(CliError::Usage(_))));
        assert!(matches!(parse_str("hydraulic 5 --pdf"), Err(CliError::Usage(_))));
    }
}
