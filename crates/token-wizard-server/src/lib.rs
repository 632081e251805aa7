//! # token-wizard server
//!
//! HTTP gateway in front of [`token_wizard_core::ContractWizard`], built on `Axum`.
//!
//! | Route | Body | Response |
//! |---|---|---|
//! | `POST /ut-contract` | [`UtilityContractRequest`](token_wizard_core::request::UtilityContractRequest) | `200 {"contract": "..."}` |
//! | `POST /gt-contract` | [`GovernanceContractRequest`](token_wizard_core::request::GovernanceContractRequest) | `200 {"contract": "..."}` |
//! | `GET /` | | liveness text |
//! | `GET /secret-path` | | static confirmation text |
//!
//! Invalid request values answer `422`, generation failures `501`; both with an empty
//! body, the cause is only logged.
//!
//! ## Example
//! ```no_run
//! use token_wizard_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::new(ServerConfig::default()).run().await
//! }
//! ```

mod router;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use token_wizard_core::ContractWizard;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

pub use router::{router, AppState, ContractResponse};

/// Listening address of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 5000;

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
        }
    }
}

/// A configured gateway ready to run.
#[must_use = "call .run().await to start the server"]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Gateway backed by the built-in ERC20 provider.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: AppState {
                wizard: Arc::new(ContractWizard::new()),
            },
        }
    }

    /// Binds the listener and serves until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        info!(address = %address, "Server is running on http://{address}");

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(async {
                if let Err(e) = shutdown_signal().await {
                    error!("Error while waiting for shutdown signal: {e}");
                    return;
                }
                info!("Shutdown signal received, starting graceful shutdown...");
            })
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.address().to_string(), "0.0.0.0:5000");
    }
}
