// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod server;

use std::path::PathBuf;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::model::Config;
use crate::engine::Runtime;
use crate::errors::Result;
use crate::exec::{Batch, CommandSpec};
use crate::server::LivenessServer;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the liveness server
/// - the iteration loop runtime
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let mut cfg = load_and_validate(&config_path)?;

    // CLI override for the iteration cap.
    if args.loops.is_some() {
        cfg.max_iterations = args.loops;
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // The server task lives for the whole process; its handle is never
    // awaited because the loop, not the server, decides when we exit.
    let _server_handle = if cfg.server.enabled {
        let server = LivenessServer::bind(cfg.server.port).await?;
        Some(server.spawn())
    } else {
        debug!("liveness server disabled by config");
        None
    };

    let runtime = Runtime::new(cfg);
    runtime.run().await
}

/// Simple dry-run output: print phases, policies and commands.
fn print_dry_run(cfg: &Config) {
    println!("reloop dry-run");
    println!("  loop.sleep = {}s", cfg.sleep.as_secs());
    match cfg.max_iterations {
        Some(n) => println!("  loop.loops = {n}"),
        None => println!("  loop.loops = unbounded"),
    }
    println!(
        "  server = {} (port {})",
        if cfg.server.enabled { "enabled" } else { "disabled" },
        cfg.server.port
    );
    println!();

    if let Some(init) = &cfg.init {
        print_batch("init", init);
        println!();
    }
    print_batch("loop", &cfg.loop_batch);
}

fn print_batch(phase: &str, batch: &Batch) {
    println!("{phase} (onerror = {}, {} commands):", batch.policy(), batch.len());
    for command in batch.commands() {
        match command.spec() {
            CommandSpec::Shell(line) => println!("  - sh: {line}"),
            CommandSpec::Argv(argv) => println!("  - argv: {argv:?}"),
        }
        println!(
            "      stdout: {}, stderr: {}",
            command.stdout_mode(),
            command.stderr_mode()
        );
    }
}
