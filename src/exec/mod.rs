// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running configured commands,
//! using `tokio::process::Command`.
//!
//! - [`command`] holds the validated [`Command`] representation and its
//!   spawn/stream/await cycle.
//! - [`batch`] runs an ordered list of commands against one working
//!   directory under one [`ErrorPolicy`].

pub mod batch;
pub mod command;

pub use batch::{Batch, ErrorPolicy};
pub use command::{Command, CommandSpec, StdioMode};
