//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be driven by in-memory doubles in tests.

use std::sync::Arc;

use crate::domain::ports::{ProductDetailQuery, UserMetaQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub user_meta: Arc<dyn UserMetaQuery>,
    pub products: Arc<dyn ProductDetailQuery>,
}

impl HttpState {
    /// Bundle the ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::domain::UserMetaService;
    /// use storefront::domain::ports::{FixtureProductDetailQuery, InMemoryUserMetaRepository};
    /// use storefront::inbound::http::state::HttpState;
    ///
    /// let user_meta = UserMetaService::new(Arc::new(InMemoryUserMetaRepository::default()));
    /// let state = HttpState::new(Arc::new(user_meta), Arc::new(FixtureProductDetailQuery));
    /// let _products = state.products.clone();
    /// ```
    pub fn new(user_meta: Arc<dyn UserMetaQuery>, products: Arc<dyn ProductDetailQuery>) -> Self {
        Self {
            user_meta,
            products,
        }
    }
}
