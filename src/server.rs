//! HTTP server initialization and runtime setup.
//!
//! Builds the lookup adapters, wires the application state and runs the
//! Axum server until Ctrl+C or SIGTERM.

use crate::config::Config;
use crate::infrastructure::dns::HickoryDnsResolver;
use crate::infrastructure::http::ReqwestFetcher;
use crate::infrastructure::whois::TcpWhoisClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - hickory DNS resolver
/// - TCP WHOIS client rooted at `WHOIS_SERVER`
/// - reqwest HTTP client with the configured user agent
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - `LISTEN` is not a socket address or the bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Production adapters behind the application state.
pub fn build_state(config: &Config) -> Result<AppState> {
    let resolver = Arc::new(HickoryDnsResolver::new(config.dns_timeout()));
    let whois = Arc::new(TcpWhoisClient::new(
        config.whois_server.clone(),
        config.whois_timeout(),
    ));
    let fetcher = Arc::new(ReqwestFetcher::new(&config.user_agent)?);

    Ok(AppState::new(resolver, whois, fetcher, config))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
