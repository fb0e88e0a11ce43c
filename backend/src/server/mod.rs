//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::{info, warn};

use storefront::Trace;
#[cfg(debug_assertions)]
use storefront::doc::ApiDoc;
use storefront::domain::UserMetaService;
use storefront::domain::ports::{
    FixtureProductDetailQuery, InMemoryUserMetaRepository, UserMetaRepository,
};
use storefront::inbound::http;
use storefront::inbound::http::error::route_not_found;
use storefront::inbound::http::health::{HealthState, live, ready};
use storefront::inbound::http::state::HttpState;
use storefront::outbound::mongo::MongoUserMetaRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the user store: MongoDB when handles are open, otherwise an empty
/// in-memory store.
fn build_user_meta_repository(config: &ServerConfig) -> Arc<dyn UserMetaRepository> {
    match &config.store {
        Some(store) => Arc::new(
            MongoUserMetaRepository::new(store).with_max_time(config.user_meta_timeout),
        ),
        None => {
            warn!("no MongoDB URI configured; serving user metadata from an empty in-memory store");
            Arc::new(InMemoryUserMetaRepository::default())
        }
    }
}

/// Build the shared HTTP state from the configured adapters.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let user_meta = UserMetaService::new(build_user_meta_repository(config))
        .with_timeout(config.user_meta_timeout);
    web::Data::new(HttpState::new(
        Arc::new(user_meta),
        Arc::new(FixtureProductDetailQuery),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("storefront")
        .registry(prometheus::Registry::new())
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("failed to configure metrics: {err}")))
}

/// Construct the HTTP server and mark the service ready once bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or, with the
/// `metrics` feature, when the Prometheus middleware cannot be built.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();
    #[cfg(feature = "metrics")]
    let metrics = make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());
        app
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "http server listening");
    health_state.mark_ready();
    Ok(server)
}
