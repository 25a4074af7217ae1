// src/exec/batch.rs

//! Sequential batch execution under a per-batch error policy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::errors::Result;
use crate::exec::command::Command;

/// What to do when a command in a batch fails.
///
/// - `Fail`: abort the batch immediately and propagate the failure.
/// - `Continue`: log the failure, abandon the *rest of the batch*, and report
///   success to the caller (best-effort, move on to the next iteration).
/// - `Ignore`: log the failure and move on to the *next command in the same
///   batch*, as if it had succeeded.
///
/// `Continue` and `Ignore` are deliberately distinct; configurations depend
/// on the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Fail,
    Continue,
    Ignore,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(ErrorPolicy::Fail),
            "continue" => Ok(ErrorPolicy::Continue),
            "ignore" => Ok(ErrorPolicy::Ignore),
            other => Err(format!(
                "invalid onerror value: {other} (expected \"fail\", \"continue\" or \"ignore\")"
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Fail => write!(f, "fail"),
            ErrorPolicy::Continue => write!(f, "continue"),
            ErrorPolicy::Ignore => write!(f, "ignore"),
        }
    }
}

/// An ordered, immutable list of commands sharing one error policy.
#[derive(Debug, Clone)]
pub struct Batch {
    commands: Vec<Command>,
    policy: ErrorPolicy,
}

impl Batch {
    pub fn new(commands: Vec<Command>, policy: ErrorPolicy) -> Self {
        Self { commands, policy }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run every command in order against `cwd`, strictly sequentially.
    ///
    /// Each command is awaited to completion before the next starts. On a
    /// command failure the batch branches on its [`ErrorPolicy`]; see the
    /// policy docs for the exact semantics.
    pub async fn run(&self, cwd: &Path) -> Result<()> {
        for command in &self.commands {
            match command.run(cwd).await {
                Ok(()) => {}
                Err(err) => match self.policy {
                    ErrorPolicy::Fail => return Err(err),
                    ErrorPolicy::Ignore => {
                        warn!(error = %err, "command failed, continuing with next command");
                    }
                    ErrorPolicy::Continue => {
                        warn!(error = %err, "command failed, abandoning rest of batch");
                        return Ok(());
                    }
                },
            }
        }
        Ok(())
    }
}
