//! Driven port for reading user metadata from the user store.
//!
//! Adapters run one membership query per call and return the decoded
//! records. Records that fail to decode are skipped by the adapter; only
//! failures that stop the whole query surface as errors.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{UserMeta, UserMetaIds};

define_port_error! {
    /// Failures raised while querying the user store.
    pub enum UserMetaRepositoryError {
        /// The query could not be started (connection, selection, auth).
        Connection { message: String } => "user store unavailable: {message}",
        /// The query started but failed while results were streamed.
        Query { message: String } => "user metadata query failed: {message}",
    }
}

/// Read access to the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserMetaRepository: Send + Sync {
    /// Return the records whose identifier is one of `ids`.
    ///
    /// Order follows the store's cursor and is not meaningful. Duplicate
    /// tokens in `ids` never yield duplicate records on their own.
    async fn find_by_user_ids(
        &self,
        ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError>;
}

/// In-process user store used when no database is configured and by tests.
///
/// # Examples
/// ```
/// use storefront::domain::ports::{InMemoryUserMetaRepository, UserMetaRepository};
/// use storefront::domain::{UserMeta, UserMetaIds};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserMetaRepository::new([UserMeta::new("u1", "alice").expect("valid")]);
/// let ids = UserMetaIds::parse("u1,u2").expect("ids");
/// let found = repo.find_by_user_ids(&ids).await.expect("query");
/// assert_eq!(found.len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserMetaRepository {
    records: Vec<UserMeta>,
}

impl InMemoryUserMetaRepository {
    /// Seed the store with `records`.
    pub fn new(records: impl IntoIterator<Item = UserMeta>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserMetaRepository for InMemoryUserMetaRepository {
    async fn find_by_user_ids(
        &self,
        ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError> {
        Ok(self
            .records
            .iter()
            .filter(|record| ids.contains(record.user_id()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryUserMetaRepository {
        InMemoryUserMetaRepository::new([
            UserMeta::new("u1", "alice").expect("valid"),
            UserMeta::new("u2", "bob").expect("valid"),
        ])
    }

    #[rstest]
    #[case("u1", 1)]
    #[case("u1,u2", 2)]
    #[case("u1,u1,u1", 1)]
    #[case("u3", 0)]
    #[case(",", 0)]
    #[tokio::test]
    async fn matches_requested_tokens(
        repo: InMemoryUserMetaRepository,
        #[case] raw: &str,
        #[case] expected: usize,
    ) {
        let ids = UserMetaIds::parse(raw).expect("ids");
        let found = repo.find_by_user_ids(&ids).await.expect("query");
        assert_eq!(found.len(), expected);
    }

    #[tokio::test]
    async fn empty_store_finds_nothing() {
        let ids = UserMetaIds::parse("u1").expect("ids");
        let found = InMemoryUserMetaRepository::default()
            .find_by_user_ids(&ids)
            .await
            .expect("query");
        assert!(found.is_empty());
    }

    #[test]
    fn errors_describe_their_stage() {
        assert_eq!(
            UserMetaRepositoryError::connection("refused").to_string(),
            "user store unavailable: refused"
        );
        assert_eq!(
            UserMetaRepositoryError::query("cursor killed").to_string(),
            "user metadata query failed: cursor killed"
        );
    }
}
