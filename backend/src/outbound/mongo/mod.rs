//! MongoDB-backed adapters.
//!
//! [`StoreHandles`] opens the client once at startup and hands out named
//! collection references; repositories clone the handles they need.

mod store;
mod user_meta_repository;

pub use store::{PRODUCTS_COLLECTION, StoreConfig, StoreError, StoreHandles, USERS_COLLECTION};
pub use user_meta_repository::MongoUserMetaRepository;
