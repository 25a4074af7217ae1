#![allow(dead_code)]

use reloop::config::{CommandEntry, CommandField, Config, RawConfigFile};
use reloop::errors::Result;

/// Builder for `Config` to simplify test setup.
///
/// Starts from the same defaults as an empty config file, so tests only
/// state what they care about.
pub struct ConfigBuilder {
    raw: RawConfigFile,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
        }
    }

    /// Add a shell-form loop command.
    pub fn loop_command(mut self, cmd: &str) -> Self {
        self.raw
            .loop_
            .commands
            .push(CommandEntry::Line(cmd.to_string()));
        self
    }

    /// Add an argv-form loop command with default stdio modes.
    pub fn loop_argv(mut self, argv: &[&str]) -> Self {
        self.raw.loop_.commands.push(CommandEntry::Full {
            command: CommandField::Argv(argv.iter().map(|s| s.to_string()).collect()),
            stdout: None,
            stderr: None,
        });
        self
    }

    /// Add a shell-form init command.
    pub fn init_command(mut self, cmd: &str) -> Self {
        self.raw
            .init
            .commands
            .push(CommandEntry::Line(cmd.to_string()));
        self
    }

    pub fn loop_onerror(mut self, policy: &str) -> Self {
        self.raw.loop_.onerror = policy.to_string();
        self
    }

    pub fn init_onerror(mut self, policy: &str) -> Self {
        self.raw.init.onerror = policy.to_string();
        self
    }

    pub fn sleep(mut self, seconds: u64) -> Self {
        self.raw.loop_.sleep = seconds;
        self
    }

    pub fn loops(mut self, n: u64) -> Self {
        self.raw.loop_.loops = Some(n);
        self
    }

    pub fn server_enabled(mut self, enabled: bool) -> Self {
        self.raw.server.enabled = enabled;
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.raw.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        Config::try_from(self.raw).expect("Failed to build valid config from builder")
    }

    /// Like [`build`](Self::build) but surfaces validation errors, for tests
    /// asserting on rejection.
    pub fn try_build(self) -> Result<Config> {
        Config::try_from(self.raw)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
