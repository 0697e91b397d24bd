//! Axum server wiring.

use crate::handlers::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use gauth_directory::Directory;
use gauth_notify::Notifier;
use gauth_platform::PlatformBinding;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How often idle per-requester session locks are reclaimed.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// The HTTP gateway, configured with a port and shared state.
pub struct GatewayServer<D, N, P> {
    pub port: u16,
    pub state: Arc<AppState<D, N, P>>,
}

impl<D, N, P> GatewayServer<D, N, P>
where
    D: Directory + 'static,
    N: Notifier + 'static,
    P: PlatformBinding + 'static,
{
    pub fn new(port: u16, state: Arc<AppState<D, N, P>>) -> Self {
        Self { port, state }
    }

    /// Build the router (exposed separately so tests can drive it without
    /// binding a socket).
    pub fn router(state: Arc<AppState<D, N, P>>) -> Router {
        Router::new()
            .route("/verify/start", post(handlers::start_handler::<D, N, P>))
            .route("/verify/submit", post(handlers::submit_handler::<D, N, P>))
            .route("/stats", get(handlers::stats_handler::<D, N, P>))
            .with_state(state)
    }

    /// Start listening. Runs until the server is shut down.
    pub async fn serve(&self) -> std::io::Result<()> {
        let state = Arc::clone(&self.state);
        let app = Self::router(Arc::clone(&self.state));

        // Idle session locks accumulate under churn; reclaim periodically.
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                state.engine.cleanup_idle_sessions().await;
            }
        });

        let addr = format!("0.0.0.0:{}", self.port);
        info!("gateway listening on {}", addr);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
