//! Command-line parsing for the pregnancy dating calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the dating core.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{LmpDate, ReferenceDate};

/// Environment variable that pins the reference date (also read from `.env`).
pub const TODAY_ENV: &str = "OBTOOLS_TODAY";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ob", version, about = "Tools for pregnancy dating and doppler values")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reference "today" (YYYY-MM-DD). Defaults to the current UTC date.
    #[arg(long, global = true, env = TODAY_ENV, value_name = "DATE")]
    pub today: Option<ReferenceDate>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form.
    Tui,
    /// Evaluate one LMP date or gestational age and print the result.
    Calc(CalcArgs),
    /// Print the Doppler percentile reference table.
    Table(TableArgs),
}

/// Options for a one-shot calculation.
#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    /// First day of the last menstrual period (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", conflicts_with = "weeks")]
    pub lmp: Option<LmpDate>,

    /// Gestational age in completed weeks, as typed into the form's number field.
    ///
    /// Only values inside the table range move the LMP; anything else keeps the
    /// default LMP and is reported as a warning.
    #[arg(long, value_name = "WEEKS", allow_hyphen_values = true)]
    pub weeks: Option<String>,

    /// Print the result as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON result to a file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for printing the reference table.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calc_with_lmp() {
        let cli = Cli::try_parse_from(["ob", "calc", "--lmp", "2025-01-01", "--today", "2025-06-01"]).unwrap();
        assert_eq!(cli.today.map(|d| d.to_string()).as_deref(), Some("2025-06-01"));
        match cli.command {
            Command::Calc(args) => {
                assert_eq!(args.lmp.map(|d| d.to_string()).as_deref(), Some("2025-01-01"));
                assert!(args.weeks.is_none());
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lmp_and_weeks_conflict() {
        let err = Cli::try_parse_from(["ob", "calc", "--lmp", "2025-01-01", "--weeks", "25"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["ob", "calc", "--lmp", "2025-02-30"]).is_err());
        assert!(Cli::try_parse_from(["ob", "table", "--today", "soon"]).is_err());
    }

    #[test]
    fn weeks_text_is_kept_verbatim() {
        let cli = Cli::try_parse_from(["ob", "-vv", "calc", "--weeks", "-3", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Calc(args) => {
                assert_eq!(args.weeks.as_deref(), Some("-3"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
