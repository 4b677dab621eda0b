use std::net::SocketAddr;

use anyhow::Result;

use nailcal_airtable::{AirtableClient, AirtableConfig};
use nailcal_core::SystemClock;
use nailcal_server::settings::Settings;
use nailcal_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nailcal_server=debug,tower_http=debug".into()),
        )
        .init();

    let settings = Settings::from_env()?;
    let port = settings.port;

    let store = AirtableClient::new(AirtableConfig::from_env()?);
    let clock = SystemClock::new(settings.timezone);
    let state = AppState::new(store, settings, clock);

    let app = nailcal_server::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("nailcal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
