// src/exec/command.rs

//! Single command representation and execution.
//!
//! A [`Command`] is validated at construction time and immutable afterwards.
//! `run(cwd)` spawns the process, forwards any piped output concurrently
//! with awaiting the exit status, and reports spawn failures separately
//! from non-zero exits.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use tokio::io::AsyncWriteExt;
use tokio::process::Command as ProcessCommand;
use tokio::task::JoinHandle;
use tracing::info;

use crate::errors::{ReloopError, Result};

/// How a command is interpreted when spawned.
///
/// - `Shell`: one string handed to the platform command shell
///   (`sh -c` / `cmd /C`), so pipes, globs and chaining inside the string
///   work.
/// - `Argv`: program + literal arguments, invoked directly with no shell
///   interpretation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Shell(String),
    Argv(Vec<String>),
}

/// Where a child output stream ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Stream bytes through to this process's matching stream as they arrive.
    #[default]
    Pipe,
    /// Discard the stream at the source; child writes succeed but go nowhere.
    Ignore,
}

impl FromStr for StdioMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pipe" => Ok(StdioMode::Pipe),
            "ignore" => Ok(StdioMode::Ignore),
            other => Err(format!(
                "invalid stdio mode: {other} (expected \"pipe\" or \"ignore\")"
            )),
        }
    }
}

impl fmt::Display for StdioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdioMode::Pipe => write!(f, "pipe"),
            StdioMode::Ignore => write!(f, "ignore"),
        }
    }
}

impl StdioMode {
    fn as_stdio(self) -> Stdio {
        match self {
            StdioMode::Pipe => Stdio::piped(),
            StdioMode::Ignore => Stdio::null(),
        }
    }
}

/// One validated, immutable command step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    spec: CommandSpec,
    stdout: StdioMode,
    stderr: StdioMode,
}

impl Command {
    /// Validate and build a command.
    ///
    /// Fails with `InvalidCommand` when the shell string is empty after
    /// trimming, or the argv form is empty / starts with an empty program.
    pub fn new(spec: CommandSpec, stdout: StdioMode, stderr: StdioMode) -> Result<Self> {
        match &spec {
            CommandSpec::Shell(line) if line.trim().is_empty() => {
                return Err(ReloopError::InvalidCommand(
                    "command string must not be empty".to_string(),
                ));
            }
            CommandSpec::Argv(argv) if argv.first().is_none_or(|program| program.is_empty()) => {
                return Err(ReloopError::InvalidCommand(
                    "argv command must start with a non-empty program".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            spec,
            stdout,
            stderr,
        })
    }

    /// Shell-form command with default (`pipe`) stdio modes.
    pub fn shell(line: impl Into<String>) -> Result<Self> {
        Self::new(
            CommandSpec::Shell(line.into()),
            StdioMode::default(),
            StdioMode::default(),
        )
    }

    /// Argv-form command with default (`pipe`) stdio modes.
    pub fn argv<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            CommandSpec::Argv(argv.into_iter().map(Into::into).collect()),
            StdioMode::default(),
            StdioMode::default(),
        )
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    pub fn stdout_mode(&self) -> StdioMode {
        self.stdout
    }

    pub fn stderr_mode(&self) -> StdioMode {
        self.stderr
    }

    /// Spawn the command in `cwd` and wait for it to finish.
    ///
    /// - stdin is always null; no input is ever forwarded to the child.
    /// - each piped output stream is forwarded to this process's matching
    ///   stream while the child runs, and fully drained before returning.
    /// - `Ok(())` only for exit status 0; a spawn error and a non-zero exit
    ///   are reported as distinct error variants.
    pub async fn run(&self, cwd: &Path) -> Result<()> {
        info!(command = %self, cwd = %cwd.display(), "running command");

        let mut cmd = match &self.spec {
            CommandSpec::Shell(line) => {
                // Platform command shell, so pipes/globs inside the string work.
                if cfg!(windows) {
                    let mut c = ProcessCommand::new("cmd");
                    c.arg("/C").arg(line);
                    c
                } else {
                    let mut c = ProcessCommand::new("sh");
                    c.arg("-c").arg(line);
                    c
                }
            }
            CommandSpec::Argv(argv) => {
                let mut c = ProcessCommand::new(&argv[0]);
                c.args(&argv[1..]);
                c
            }
        };

        cmd.current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(self.stdout.as_stdio())
            .stderr(self.stderr.as_stdio())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| ReloopError::SpawnFailure {
            command: self.to_string(),
            source,
        })?;

        // Pumps must run while we wait: a full pipe would otherwise block the
        // child and deadlock `wait()`.
        let stdout_pump = child.stdout.take().map(|mut stream| -> JoinHandle<()> {
            tokio::spawn(async move {
                let mut sink = tokio::io::stdout();
                let _ = tokio::io::copy(&mut stream, &mut sink).await;
                let _ = sink.flush().await;
            })
        });
        let stderr_pump = child.stderr.take().map(|mut stream| -> JoinHandle<()> {
            tokio::spawn(async move {
                let mut sink = tokio::io::stderr();
                let _ = tokio::io::copy(&mut stream, &mut sink).await;
                let _ = sink.flush().await;
            })
        });

        let status = child.wait().await?;

        // Both pipes fully drained before the command counts as complete.
        if let Some(pump) = stdout_pump {
            let _ = pump.await;
        }
        if let Some(pump) = stderr_pump {
            let _ = pump.await;
        }

        if status.success() {
            Ok(())
        } else {
            Err(ReloopError::NonZeroExit {
                command: self.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spec {
            CommandSpec::Shell(line) => write!(f, "{line}"),
            CommandSpec::Argv(argv) => write!(f, "{}", argv.join(" ")),
        }
    }
}
