//! Sprig: link issue tracking to git branch management.
//!
//! This is the main entry point for the `sprig` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod auth;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod issue;
mod naming;
mod repo;
mod resolver;
mod status;
#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
