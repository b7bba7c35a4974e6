use std::net::SocketAddr;

use anyhow::Context;
use dental_insights::{config::Settings, create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dental_insights=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid BIND_ADDR: {}", settings.bind_addr))?;

    let state = AppState::new(settings).context("Failed to initialise services")?;

    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
