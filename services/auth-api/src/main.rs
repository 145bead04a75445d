//! Warden Auth API
//!
//! Cookie-session authentication service: password and Google OAuth2 login,
//! access/refresh token pairs with server-side refresh rotation.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

mod config;
mod cookies;
mod error;
mod extractors;
mod google;
mod handlers;
mod router;
mod state;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Warden Auth API");

    let config = Config::from_env()?;
    let pool = warden_db::create_pool(&config.database_url).await?;

    let port = config.port;
    let state = state::AppState::new(pool.clone(), config);
    let app = router::build(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
