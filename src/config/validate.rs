// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{CommandEntry, CommandField, Config, RawConfigFile, ServerConfig};
use crate::errors::{ReloopError, Result};
use crate::exec::{Batch, Command, CommandSpec, ErrorPolicy, StdioMode};

impl TryFrom<RawConfigFile> for Config {
    type Error = crate::errors::ReloopError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        if raw.loop_.commands.is_empty() {
            return Err(ReloopError::InvalidConfig(
                "[loop].commands must contain at least one command".to_string(),
            ));
        }

        let loop_policy = parse_policy(&raw.loop_.onerror)?;
        let init_policy = parse_policy(&raw.init.onerror)?;

        let loop_batch = Batch::new(build_commands(&raw.loop_.commands)?, loop_policy);

        let init = if raw.init.commands.is_empty() {
            None
        } else {
            Some(Batch::new(build_commands(&raw.init.commands)?, init_policy))
        };

        Ok(Config {
            init,
            loop_batch,
            sleep: Duration::from_secs(raw.loop_.sleep),
            max_iterations: raw.loop_.loops,
            server: ServerConfig {
                enabled: raw.server.enabled,
                port: raw.server.port,
            },
        })
    }
}

fn parse_policy(s: &str) -> Result<ErrorPolicy> {
    s.parse().map_err(ReloopError::InvalidPolicy)
}

fn build_commands(entries: &[CommandEntry]) -> Result<Vec<Command>> {
    entries.iter().map(command_from_entry).collect()
}

fn command_from_entry(entry: &CommandEntry) -> Result<Command> {
    match entry {
        CommandEntry::Line(line) => Command::new(
            CommandSpec::Shell(line.clone()),
            StdioMode::default(),
            StdioMode::default(),
        ),
        CommandEntry::Full {
            command,
            stdout,
            stderr,
        } => {
            let spec = match command {
                CommandField::Line(line) => CommandSpec::Shell(line.clone()),
                CommandField::Argv(argv) => CommandSpec::Argv(argv.clone()),
            };
            Command::new(
                spec,
                parse_stdio(stdout.as_deref())?,
                parse_stdio(stderr.as_deref())?,
            )
        }
    }
}

/// An unset stdio mode defaults to `pipe`.
fn parse_stdio(mode: Option<&str>) -> Result<StdioMode> {
    match mode {
        None => Ok(StdioMode::default()),
        Some(s) => s.parse().map_err(ReloopError::InvalidCommand),
    }
}
