//! Domain model for the storefront backend.
//!
//! Purpose: hold the types and use-cases behind the HTTP surface without
//! depending on actix or MongoDB. Inbound adapters turn requests into these
//! types; outbound adapters fill them from storage.
//!
//! Public surface:
//! - [`UserMetaIds`], [`UserMeta`], [`UserMetaDirectory`]: batch profile lookup.
//! - [`UserMetaService`]: deadline-bound lookup over a user store port.
//! - [`Product`]: product detail record.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.

pub mod error;
pub mod ports;
pub mod product;
pub mod trace_id;
pub mod user_meta;
mod user_meta_service;

pub use self::error::{Error, ErrorCode};
pub use self::product::Product;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_meta::{
    UserMeta, UserMetaDirectory, UserMetaIds, UserMetaIdsError, UserMetaValidationError,
};
pub use self::user_meta_service::{
    DEFAULT_USER_META_TIMEOUT, USER_META_QUERY_FAILED, UserMetaService,
};
