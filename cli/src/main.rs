//! bigcrack
//!
//! Recover the Broadcast Code of an encrypted LE Audio BIG from one
//! captured BIS PDU and its BIGInfo.
//!
//! Exit codes: 0 code found, 1 search finished without a match,
//! 2 bad input or setup failure.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod report;

use args::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "bigcrack=info,bigcrack_core=info";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "bigcrack=debug,bigcrack_core=debug" } else { DEFAULT_LOG_FILTER }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Crack(args) => commands::crack::run(args),
        Command::Forge(args) => commands::forge::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}
