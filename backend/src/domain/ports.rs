//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`UserMetaQuery`], [`ProductDetailQuery`]) are what inbound
//! adapters call. Driven ports ([`UserMetaRepository`]) are what outbound
//! adapters implement; their errors are typed so the domain can decide what
//! reaches the client.

mod macros;
mod product_detail_query;
mod user_meta_query;
mod user_meta_repository;

pub(crate) use macros::define_port_error;

pub use product_detail_query::{FixtureProductDetailQuery, ProductDetailQuery};
pub use user_meta_query::UserMetaQuery;
#[cfg(test)]
pub use user_meta_repository::MockUserMetaRepository;
pub use user_meta_repository::{
    InMemoryUserMetaRepository, UserMetaRepository, UserMetaRepositoryError,
};
