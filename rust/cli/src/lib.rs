//! # Tilt CLI Library
//!
//! Headless driver for the heads-up engine and its bot.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments and executes the subcommand,
//! writing to the given streams and returning the process exit code.
//!
//! ## Available Subcommands
//!
//! - `sim`: Bot-vs-stand-in match with JSONL hand histories
//! - `equity`: Monte-Carlo equity of a hand against a range
//! - `cfg`: Resolved configuration with value sources
//! - `presets`: Built-in personalities

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, TiltCli};
use commands::{
    SimArgs, handle_cfg_command, handle_equity_command, handle_presets_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "equity", "cfg", "presets"];

/// Main entry point for the CLI application.
///
/// Exit code: `0` for success, `2` for errors.
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = tilt_cli::run(["tilt", "presets"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("maniac"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match TiltCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            hands,
            seed,
            level,
            opponent,
            stand_in,
            output,
        } => handle_sim_command(
            SimArgs {
                hands,
                seed,
                level,
                opponent,
                stand_in,
                output,
            },
            out,
            err,
        ),
        Commands::Equity {
            hero,
            board,
            range,
            trials,
            seed,
        } => handle_equity_command(&hero, board.as_deref(), &range, trials, seed, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Presets => handle_presets_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn report_usage(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }
    if writeln!(err, "{}", e).is_err()
        || writeln!(err).is_err()
        || writeln!(err, "Tilt Poker CLI").is_err()
        || writeln!(err, "Usage: tilt <command> [options]\n").is_err()
        || writeln!(err, "Commands:").is_err()
    {
        return exit_code::ERROR;
    }
    for c in COMMANDS {
        if writeln!(err, "  {}", c).is_err() {
            return exit_code::ERROR;
        }
    }
    if writeln!(err, "\nFor full help, run: tilt --help").is_err() {
        return exit_code::ERROR;
    }
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_parses() {
        let commands = vec![
            vec!["tilt", "sim", "--hands", "1"],
            vec!["tilt", "equity", "--hero", "AsKs"],
            vec!["tilt", "cfg"],
            vec!["tilt", "presets"],
        ];
        for cmd_args in commands {
            assert!(TiltCli::try_parse_from(&cmd_args).is_ok(), "{:?}", cmd_args);
        }
        assert_eq!(COMMANDS.len(), 4);
    }

    #[test]
    fn level_is_range_checked() {
        assert!(TiltCli::try_parse_from(["tilt", "sim", "--hands", "1", "--level", "0"]).is_err());
        assert!(TiltCli::try_parse_from(["tilt", "sim", "--hands", "1", "--level", "11"]).is_err());
        assert!(TiltCli::try_parse_from(["tilt", "sim", "--hands", "1", "--level", "10"]).is_ok());
    }

    #[test]
    fn unknown_command_prints_usage() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["tilt", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("Usage: tilt"));
        assert!(stderr.contains("presets"));
    }
}
