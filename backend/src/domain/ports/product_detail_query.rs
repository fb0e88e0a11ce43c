//! Driving port for product detail reads.

use async_trait::async_trait;

use crate::domain::{Error, Product};

/// Domain use-case port returning a product by entity coordinates.
#[async_trait]
pub trait ProductDetailQuery: Send + Sync {
    /// Fetch the product identified by `entity_type` and `entity_id`.
    async fn fetch_product(&self, entity_type: &str, entity_id: &str) -> Result<Product, Error>;
}

/// Placeholder catalogue serving [`Product::sample`] records until the
/// product collection is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductDetailQuery;

#[async_trait]
impl ProductDetailQuery for FixtureProductDetailQuery {
    async fn fetch_product(&self, entity_type: &str, entity_id: &str) -> Result<Product, Error> {
        Ok(Product::sample(entity_type, entity_id))
    }
}
