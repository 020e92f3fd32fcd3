use anyhow::Result;
use axum::http::HeaderValue;
use clap::Parser;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use demographics::{CensusClient, DemographicsService, ZipLocator};
use territory_lock::{InMemoryStore, SystemClock, TerritoryManager};

mod config;
mod error;
mod notify;
mod routes;

use config::GatewayConfig;
use notify::NatsNotifier;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "territory_gateway=debug,territory_lock=debug,demographics=info,info".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::parse();

    let notifier = NatsNotifier::start(config.nats_url.as_deref()).await;
    let manager = TerritoryManager::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(SystemClock),
        Arc::new(notifier),
        config.lock_config(),
    );
    let resumed = manager.resume_expirations().await?;
    tracing::info!("   Hold expiry timers resumed: {}", resumed);

    let demographics = DemographicsService::new(
        ZipLocator::new(config.zipcode_api_key.clone())?,
        CensusClient::new(config.census_base_url.clone(), config.census_api_key.clone())?,
    );
    if config.zipcode_api_key.is_none() {
        tracing::warn!("   ZIPCODE_API_KEY not set - demographics use metro ZIP approximation");
    }
    if config.google_maps_api_key.is_none() {
        tracing::warn!("   GOOGLE_MAPS_API_KEY not set - /api/v1/config will fail");
    }

    let state = AppState {
        manager: Arc::new(manager),
        demographics: Arc::new(demographics),
        google_maps_api_key: config.google_maps_api_key.clone(),
    };

    let app = routes::app(state)
        .layer(cors_layer(&config.origins()))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("🗺️  Territory Gateway starting on {}", addr);
    tracing::info!("   Hold duration: {} hours", config.lock_config().hold_duration.num_hours());
    tracing::info!("   Territory capacity: {}", config.territory_capacity);
    tracing::info!("   Allowed origins: {}", config.origins().join(", "));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Unknown origins get no CORS headers.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("   Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
