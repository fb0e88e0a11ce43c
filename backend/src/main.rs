//! Backend entry-point: loads settings, opens the store, and serves the REST
//! endpoints until shutdown.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::outbound::mongo::StoreHandles;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mut config = ServerConfig::from_settings(&settings)
        .map_err(|e| std::io::Error::other(format!("invalid settings: {e}")))?;

    let store = match settings.store_config() {
        Some(store_config) => Some(
            StoreHandles::connect(&store_config)
                .await
                .map_err(std::io::Error::other)?,
        ),
        None => None,
    };
    if let Some(store) = &store {
        config = config.with_store(store.clone());
    }

    let health_state = web::Data::new(HealthState::new());
    let result = create_server(health_state.clone(), config)?.await;

    health_state.mark_draining();
    if let Some(store) = store {
        store.shutdown().await;
    }
    info!("server stopped");
    result
}
