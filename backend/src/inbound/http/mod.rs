//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod products;
pub mod respond;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the storefront endpoints and their extractor settings.
///
/// Application state ([`state::HttpState`]) must be provided by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(storefront::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::query_config())
        .service(users::user_meta)
        .service(products::product_detail);
}
