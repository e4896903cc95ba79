use crate::config::RelayConfig;
use crate::fetcher::{build_http_client, CandleFetcher};
use crate::state::AppState;
use std::error::Error;
use tracing_subscriber::EnvFilter;

mod config;
mod data;
mod error;
mod fetcher;
mod provider;
mod routes;
mod state;
mod symbol;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env();

    let client = build_http_client(&config.user_agent, config.request_timeout)?;
    let provider = config.provider.build();
    tracing::info!(
        provider = provider.name(),
        mirrors = ?config.mirrors,
        policy = ?config.failure_policy,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "upstream configured"
    );

    let fetcher = CandleFetcher::new(client, provider, config.mirrors.clone());
    let app = routes::router(AppState::new(fetcher, config.failure_policy));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.bind, config.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
