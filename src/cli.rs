// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `reloop`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reloop",
    version,
    about = "Run a configured sequence of commands on a timed loop.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Reloop.toml` in the current working directory.
    #[arg(value_name = "CONFIG")]
    pub config: Option<String>,

    /// Print full error detail and enable debug-level logging.
    #[arg(long)]
    pub debug: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--debug`, `RELOOP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Stop after this many iterations, overriding `[loop].loops` from the
    /// config file.
    #[arg(long, value_name = "N")]
    pub loops: Option<u64>,

    /// Parse + validate, print the effective config, but don't execute any
    /// commands.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
