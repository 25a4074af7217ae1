// src/engine/runtime.rs

use tracing::{debug, info, warn};

use crate::config::model::Config;
use crate::errors::Result;
use crate::exec::Batch;

/// The main loop runtime.
///
/// Owns the validated configuration and runs the init phase followed by the
/// loop phase. Commands and iterations are strictly sequential; the only
/// concurrency here is inside a single command's output streaming.
#[derive(Debug)]
pub struct Runtime {
    init: Option<Batch>,
    loop_batch: Batch,
    sleep: std::time::Duration,
    max_iterations: Option<u64>,
}

impl Runtime {
    pub fn new(config: Config) -> Self {
        Self {
            init: config.init,
            loop_batch: config.loop_batch,
            sleep: config.sleep,
            max_iterations: config.max_iterations,
        }
    }

    /// Run init once, then loop until the iteration cap (if any) is reached.
    ///
    /// Returns `Err` only for a `fail`-policy batch failure (or an IO error
    /// creating a scratch directory); the caller turns that into a non-zero
    /// process exit.
    pub async fn run(self) -> Result<()> {
        if let Some(init) = &self.init {
            let cwd = std::env::current_dir()?;
            info!(commands = init.len(), policy = %init.policy(), "running init commands");
            init.run(&cwd).await?;
        }

        let mut iteration: u64 = 0;
        loop {
            iteration += 1;

            let scratch = tempfile::Builder::new().prefix("reloop-").tempdir()?;
            info!(
                iteration,
                dir = %scratch.path().display(),
                "starting iteration"
            );

            let outcome = self.loop_batch.run(scratch.path()).await;

            // The scratch dir is removed on every path; a cleanup error is
            // logged but must not mask the batch outcome. `TempDir`'s `Drop`
            // covers the panic path.
            let scratch_path = scratch.path().to_path_buf();
            if let Err(err) = scratch.close() {
                warn!(
                    dir = %scratch_path.display(),
                    error = %err,
                    "failed to remove scratch directory"
                );
            }

            outcome?;
            info!(iteration, "iteration finished");

            if let Some(max) = self.max_iterations {
                if iteration >= max {
                    info!(iterations = iteration, "iteration limit reached, stopping");
                    return Ok(());
                }
            }

            if !self.sleep.is_zero() {
                debug!(seconds = self.sleep.as_secs(), "sleeping before next iteration");
                tokio::time::sleep(self.sleep).await;
            }
        }
    }
}
