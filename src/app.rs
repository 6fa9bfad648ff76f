//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - resolves the reference date
//! - dispatches to the TUI, the one-shot calculator, or the table listing

use clap::Parser;

use crate::cli::{CalcArgs, Command, TableArgs};
use crate::config::AppConfig;
use crate::error::AppError;

pub mod session;

/// Entry point for the `ob` binary.
pub fn run() -> Result<(), AppError> {
    crate::config::load_dotenv();

    // We want `ob` and `ob --today D` to behave like `ob tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init(cli.verbose);

    let config = AppConfig::from_cli(&cli);

    match cli.command {
        Command::Tui => crate::tui::run(&config),
        Command::Calc(args) => handle_calc(&config, &args),
        Command::Table(args) => handle_table(&config, &args),
    }
}

fn handle_calc(config: &AppConfig, args: &CalcArgs) -> Result<(), AppError> {
    let form = session::run_calc(config, args);
    let view = form.view();

    if args.json {
        println!("{}", crate::io::view_to_json(view)?);
    } else {
        print!("{}", crate::report::format_summary(view));
    }

    if let Some(path) = &args.export {
        crate::io::write_view_json(path, view)?;
    }

    Ok(())
}

fn handle_table(config: &AppConfig, args: &TableArgs) -> Result<(), AppError> {
    if args.json {
        println!("{}", crate::io::table_to_json(&config.table)?);
    } else {
        print!("{}", crate::report::format_table(&config.table));
        println!();
        println!("{}", crate::report::DISCLAIMER);
    }
    Ok(())
}

/// Rewrite argv so `ob` defaults to `ob tui`.
///
/// Rules:
/// - `ob`                      -> `ob tui`
/// - `ob --today D ...`        -> `ob tui --today D ...`
/// - `ob --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "calc" | "table");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["ob"])), argv(&["ob", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["ob", "--today", "2025-06-01"])),
            argv(&["ob", "tui", "--today", "2025-06-01"])
        );
        assert_eq!(rewrite_args(argv(&["ob", "-v"])), argv(&["ob", "tui", "-v"]));
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["ob", "calc", "--json"])), argv(&["ob", "calc", "--json"]));
        assert_eq!(rewrite_args(argv(&["ob", "--help"])), argv(&["ob", "--help"]));
        assert_eq!(rewrite_args(argv(&["ob", "table"])), argv(&["ob", "table"]));
    }
}
