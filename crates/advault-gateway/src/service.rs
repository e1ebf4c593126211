//! HTTP service bootstrap.

use crate::routes;
use crate::state::AppState;
use std::env;
use std::net::SocketAddr;
use tracing::info;

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3001 }
    }
}

impl ServerConfig {
    /// Read `PORT` from the environment, keeping the default when it is
    /// absent or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(Self::default().port);
        Self { port }
    }
}

/// Bind and serve until the process receives ctrl-c.
pub async fn serve(state: AppState, config: ServerConfig) -> std::io::Result<()> {
    let router = routes::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(ServerConfig::default().port, 3001);
    }
}
