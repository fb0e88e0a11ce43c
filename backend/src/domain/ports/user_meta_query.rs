//! Driving port for batch user metadata lookups.
//!
//! HTTP handlers depend on this trait rather than on the store so they can be
//! exercised with in-memory doubles.

use async_trait::async_trait;

use crate::domain::{Error, UserMetaDirectory, UserMetaIds};

/// Domain use-case port resolving identifiers to public profile metadata.
#[async_trait]
pub trait UserMetaQuery: Send + Sync {
    /// Resolve `ids`, omitting identifiers the store does not know.
    ///
    /// Store failures and deadline overruns surface as
    /// [`crate::domain::ErrorCode::InternalError`] with a generic message.
    async fn lookup(&self, ids: &UserMetaIds) -> Result<UserMetaDirectory, Error>;
}
