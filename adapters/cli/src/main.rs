#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the autodrive simulation interactively.

mod input;
mod session;

use std::io;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::session::Session;

/// Interactive auto driving car simulation.
#[derive(Debug, Parser)]
#[command(name = "autodrive", version)]
struct CliArgs {
    /// Minimum severity of diagnostics written to stderr. Falls back to
    /// `RUST_LOG`, then to `warn`.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

/// Severity threshold accepted by `--log-level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Entry point for the autodrive command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock()).run()
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let _ = builder.format_timestamp(None).format_target(false);
    if let Some(level) = level {
        let _ = builder.filter_level(level.into());
    }
    builder.init();
}
