// src/server.rs

//! Liveness HTTP server.
//!
//! A single fixed route so an external supervisor can probe that the
//! process is alive while the loop runs. The server shares no state with
//! the loop and accepts requests at any time, including mid-batch.
//!
//! Route behaviour:
//! - `GET /healthz` → 200 with a fixed body
//! - `HEAD /healthz` → 200, no body
//! - any other method on `/healthz` → 405
//! - any other path → 404

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::Result;

/// Path answered by the liveness server.
pub const HEALTH_PATH: &str = "/healthz";

/// Body returned for `GET` on [`HEALTH_PATH`].
pub const HEALTH_BODY: &str = "ok";

/// A bound-but-not-yet-serving liveness server.
///
/// Binding is split from serving so that a port conflict surfaces as a
/// startup error instead of dying silently inside a background task.
pub struct LivenessServer {
    listener: TcpListener,
}

impl LivenessServer {
    /// Bind the listener on all interfaces. A bind failure is fatal for the
    /// caller.
    pub async fn bind(port: u16) -> Result<Self> {
        use anyhow::Context;

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding liveness server to {addr}"))?;

        Ok(Self { listener })
    }

    /// The address actually bound (useful when the port was 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve in a background task for the lifetime of the process.
    pub fn spawn(self) -> JoinHandle<()> {
        let addr = self.listener.local_addr().ok();
        let app = router();

        tokio::spawn(async move {
            if let Some(addr) = addr {
                info!(%addr, path = HEALTH_PATH, "liveness server listening");
            }
            if let Err(err) = axum::serve(self.listener, app).await {
                error!(error = %err, "liveness server error");
            }
        })
    }
}

/// The liveness router.
///
/// `get` also answers `HEAD` (axum strips the body); other methods on the
/// route get 405 from the method router, unknown paths get the default 404
/// fallback.
pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, get(|| async { HEALTH_BODY }))
}
