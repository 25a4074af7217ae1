// src/config/model.rs

use serde::Deserialize;
use std::time::Duration;

use crate::exec::Batch;

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of the config surface:
///
/// ```toml
/// [loop]
/// sleep = 60
/// onerror = "continue"
/// commands = [
///   "make render",
///   { command = ["kubectl", "apply", "-f", "out/"], stderr = "ignore" },
/// ]
///
/// [init]
/// commands = ["git clone https://example.com/repo ."]
///
/// [server]
/// port = 3000
/// ```
///
/// All sections are optional except that `[loop].commands` must end up
/// non-empty; defaults are applied here via `serde`, semantic validation
/// happens in [`TryFrom<RawConfigFile> for Config`](crate::config::validate).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// The repeated phase, from `[loop]`.
    #[serde(rename = "loop", default)]
    pub loop_: LoopSection,

    /// The run-once phase, from `[init]`.
    #[serde(default)]
    pub init: InitSection,

    /// Liveness server settings, from `[server]`.
    #[serde(default)]
    pub server: ServerSection,
}

/// `[loop]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoopSection {
    /// Seconds to pause between iterations; 0 means none.
    #[serde(default = "default_sleep")]
    pub sleep: u64,

    /// `"fail"`, `"continue"` or `"ignore"`.
    #[serde(default = "default_loop_onerror")]
    pub onerror: String,

    /// Optional iteration cap; absent means loop forever.
    #[serde(default)]
    pub loops: Option<u64>,

    /// Commands run each iteration. Required, non-empty.
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

fn default_sleep() -> u64 {
    60
}

fn default_loop_onerror() -> String {
    "continue".to_string()
}

impl Default for LoopSection {
    fn default() -> Self {
        Self {
            sleep: default_sleep(),
            onerror: default_loop_onerror(),
            loops: None,
            commands: Vec::new(),
        }
    }
}

/// `[init]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InitSection {
    /// `"fail"`, `"continue"` or `"ignore"`.
    #[serde(default = "default_init_onerror")]
    pub onerror: String,

    /// Commands run once, before the loop starts. Optional.
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

fn default_init_onerror() -> String {
    "fail".to_string()
}

impl Default for InitSection {
    fn default() -> Self {
        Self {
            onerror: default_init_onerror(),
            commands: Vec::new(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_enabled")]
    pub enabled: bool,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_enabled() -> bool {
    true
}

fn default_server_port() -> u16 {
    3000
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            enabled: default_server_enabled(),
            port: default_server_port(),
        }
    }
}

/// One command entry as written in the config file.
///
/// Either a plain string (shell-executed, both streams piped) or a table
/// with an explicit command and optional stdio modes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommandEntry {
    Line(String),
    Full {
        command: CommandField,
        #[serde(default)]
        stdout: Option<String>,
        #[serde(default)]
        stderr: Option<String>,
    },
}

/// The `command` field of a full entry: shell string or argv list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommandField {
    Line(String),
    Argv(Vec<String>),
}

/// Fully validated configuration handed to the engine.
///
/// Built from [`RawConfigFile`] via `TryFrom`; every command and policy in
/// here has already passed construction-time validation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Commands run once before the loop, against the process working
    /// directory. `None` when `[init].commands` is absent or empty.
    pub init: Option<Batch>,

    /// Commands run every iteration against a fresh scratch directory.
    pub loop_batch: Batch,

    /// Pause between iterations; zero means none.
    pub sleep: Duration,

    /// Optional iteration cap; `None` loops forever.
    pub max_iterations: Option<u64>,

    pub server: ServerConfig,
}

/// Validated liveness server settings.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub enabled: bool,
    pub port: u16,
}
