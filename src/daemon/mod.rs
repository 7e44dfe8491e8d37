//! Daemon - the HTTP front of the task store
//!
//! Serves the four task operations over HTTP:
//! - `/add?task=...` (GET or POST): create a task
//! - `/delete?id=N` (GET or POST): delete a task
//! - `/toggle?id=N` (GET or POST): flip a task's done flag
//! - `/list` (GET): all tasks as JSON

pub mod context;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::error::Result;

pub use context::DaemonContext;
pub use handlers::{handle_add, handle_delete, handle_list, handle_toggle, parse_id};

/// Build the router with all task routes registered.
pub fn router(ctx: Arc<DaemonContext>) -> Router {
    Router::new()
        .route("/add", get(handle_add).post(handle_add))
        .route("/delete", get(handle_delete).post(handle_delete))
        .route("/toggle", get(handle_toggle).post(handle_toggle))
        .route("/list", get(handle_list))
        .with_state(ctx)
}

/// The task HTTP server.
#[derive(Debug)]
pub struct Daemon {
    addr: String,
    context: Arc<DaemonContext>,
}

impl Daemon {
    pub fn new(addr: impl Into<String>, context: DaemonContext) -> Self {
        Self {
            addr: addr.into(),
            context: Arc::new(context),
        }
    }

    /// The `host:port` this daemon binds to.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<S>(self, listener: TcpListener, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!("Serving tasks on http://{}", local);

        axum::serve(listener, router(self.context))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Daemon stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
