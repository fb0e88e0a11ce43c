//! Batch user metadata lookup bound by a per-request deadline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{UserMetaQuery, UserMetaRepository};
use crate::domain::{Error, UserMetaDirectory, UserMetaIds};

/// Message returned to clients whenever the user store cannot answer.
pub const USER_META_QUERY_FAILED: &str = "DB query failed";

/// Deadline applied to one lookup unless configured otherwise.
pub const DEFAULT_USER_META_TIMEOUT: Duration = Duration::from_secs(5);

/// [`UserMetaQuery`] implementation backed by a [`UserMetaRepository`].
///
/// Each lookup runs under its own deadline. When the deadline fires, or the
/// caller drops the lookup future, the repository future is dropped with it,
/// which releases any open cursor.
#[derive(Clone)]
pub struct UserMetaService {
    repository: Arc<dyn UserMetaRepository>,
    timeout: Duration,
}

impl UserMetaService {
    /// Build a service using [`DEFAULT_USER_META_TIMEOUT`].
    pub fn new(repository: Arc<dyn UserMetaRepository>) -> Self {
        Self {
            repository,
            timeout: DEFAULT_USER_META_TIMEOUT,
        }
    }

    /// Override the per-lookup deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Deadline applied to each lookup.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl UserMetaQuery for UserMetaService {
    async fn lookup(&self, ids: &UserMetaIds) -> Result<UserMetaDirectory, Error> {
        let query = self.repository.find_by_user_ids(ids);
        let records = match tokio::time::timeout(self.timeout, query).await {
            Ok(Ok(records)) => records,
            Ok(Err(err)) => {
                error!(error = %err, requested = ids.len(), "user metadata query failed");
                return Err(Error::internal(USER_META_QUERY_FAILED));
            }
            Err(_) => {
                error!(
                    timeout_ms = self.timeout_ms(),
                    requested = ids.len(),
                    "user metadata query exceeded its deadline"
                );
                return Err(Error::internal(USER_META_QUERY_FAILED));
            }
        };

        let directory = UserMetaDirectory::from_records(ids, records);
        debug!(
            requested = ids.len(),
            found = directory.len(),
            "user metadata lookup completed"
        );
        Ok(directory)
    }
}
