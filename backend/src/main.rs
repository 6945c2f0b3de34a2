use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workdays_backend::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workdays_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        holidays_url = %config.holidays_url,
        holidays_cache_ttl_seconds = config.holidays_cache_ttl_seconds,
        holidays_fetch_timeout_seconds = config.holidays_fetch_timeout_seconds,
        time_zone = %config.calendar.time_zone,
        "Loaded configuration from environment/.env"
    );

    let port = config.port;
    let state = AppState::from_config(config)?;
    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
