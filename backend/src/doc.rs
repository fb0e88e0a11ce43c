//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the handler annotations from the inbound layer. Swagger
//! UI serves it in debug builds and `cargo run --bin openapi-dump` prints it
//! for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::products::ProductResponse;
use crate::inbound::http::respond::ErrorBody;
use crate::inbound::http::users::{UserMetaEntry, UserMetaResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront backend API",
        description = "Public user metadata lookups, product details, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::user_meta,
        crate::inbound::http::products::product_detail,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorBody, UserMetaEntry, UserMetaResponse, ProductResponse)),
    tags(
        (name = "users", description = "Public user profile metadata"),
        (name = "products", description = "Product details"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
