use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seatbook::config::Config;
use seatbook::gateway::{self, BookingApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Seatbook public gateway");

    let client = BookingApiClient::from_config(&config.gateway);
    let app = gateway::routes(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));
    info!(
        "Gateway listening on {} (booking api at {})",
        addr, config.gateway.api_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
