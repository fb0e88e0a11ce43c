//! Public profile metadata served by the batch lookup.
//!
//! A lookup starts from a comma-joined list of user identifiers and ends as a
//! [`UserMetaDirectory`]: one entry per requested identifier that the store
//! knew about. Unknown identifiers are simply absent.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Identifiers requested by a single lookup.
///
/// Parsing is deliberately lax: the raw value is split on `,` without
/// trimming, deduplication, or dropping empty tokens. Each token is matched
/// against the store as-is.
///
/// # Examples
/// ```
/// use storefront::domain::UserMetaIds;
///
/// let ids = UserMetaIds::parse("u1, u2,,u1").expect("non-empty list");
/// assert_eq!(ids.as_slice(), ["u1", " u2", "", "u1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMetaIds(Vec<String>);

/// Rejection reasons for [`UserMetaIds::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserMetaIdsError {
    /// The identifier list was empty.
    #[error("user id list must not be empty")]
    Empty,
}

impl UserMetaIds {
    /// Split a comma-joined identifier list.
    pub fn parse(raw: &str) -> Result<Self, UserMetaIdsError> {
        if raw.is_empty() {
            return Err(UserMetaIdsError::Empty);
        }
        Ok(Self(raw.split(',').map(str::to_owned).collect()))
    }

    /// Tokens in request order, duplicates included.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the tokens in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a parsed list holds at least one token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `user_id` is one of the requested tokens.
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.0.iter().any(|token| token == user_id)
    }
}

/// Rejection reasons for [`UserMeta::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserMetaValidationError {
    /// Entries without a username are never served.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Public profile fields of one user.
///
/// ## Invariants
/// - `username` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMeta {
    user_id: String,
    username: String,
    name: Option<String>,
    avatar: Option<String>,
}

impl UserMeta {
    /// Build metadata for `user_id`, rejecting an empty username.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::UserMeta;
    ///
    /// let meta = UserMeta::new("u1", "alice").expect("valid").with_name("Alice");
    /// assert_eq!(meta.name(), Some("Alice"));
    /// assert!(UserMeta::new("u2", "").is_err());
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, UserMetaValidationError> {
        let username = username.into();
        if username.is_empty() {
            return Err(UserMetaValidationError::EmptyUsername);
        }
        Ok(Self {
            user_id: user_id.into(),
            username,
            name: None,
            avatar: None,
        })
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Store key of the user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Login handle, never empty.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Display name, when the user set one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Avatar reference, when the user set one.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}

/// Result of a lookup, keyed by user identifier.
///
/// ## Invariants
/// - Holds at most one entry per identifier; a later record for the same
///   identifier replaces the earlier one.
/// - When built with [`UserMetaDirectory::from_records`], every key is one of
///   the requested tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMetaDirectory {
    entries: HashMap<String, UserMeta>,
}

impl UserMetaDirectory {
    /// Assemble the directory from store records, keeping only records whose
    /// identifier was requested.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::{UserMeta, UserMetaDirectory, UserMetaIds};
    ///
    /// let ids = UserMetaIds::parse("u1,u1").expect("ids");
    /// let records = vec![
    ///     UserMeta::new("u1", "alice").expect("valid"),
    ///     UserMeta::new("u9", "mallory").expect("valid"),
    /// ];
    /// let directory = UserMetaDirectory::from_records(&ids, records);
    /// assert_eq!(directory.len(), 1);
    /// assert!(directory.get("u9").is_none());
    /// ```
    pub fn from_records(ids: &UserMetaIds, records: impl IntoIterator<Item = UserMeta>) -> Self {
        let requested: HashSet<&str> = ids.iter().collect();
        let mut directory = Self::default();
        for record in records {
            if requested.contains(record.user_id()) {
                directory.insert(record);
            }
        }
        directory
    }

    /// Insert or replace the entry for the record's identifier.
    pub fn insert(&mut self, meta: UserMeta) {
        self.entries.insert(meta.user_id.clone(), meta);
    }

    /// Entry for `user_id`, if found.
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&UserMeta> {
        self.entries.get(user_id)
    }

    /// Number of distinct users found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no requested user was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &UserMeta> {
        self.entries.values()
    }
}

impl IntoIterator for UserMetaDirectory {
    type Item = UserMeta;
    type IntoIter = std::collections::hash_map::IntoValues<String, UserMeta>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta(user_id: &str, username: &str) -> UserMeta {
        UserMeta::new(user_id, username).expect("valid user meta")
    }

    #[rstest]
    #[case("u1", &["u1"])]
    #[case("u1,u2", &["u1", "u2"])]
    #[case("u1,u1", &["u1", "u1"])]
    #[case(" u1 ,u2", &[" u1 ", "u2"])]
    #[case(",", &["", ""])]
    #[case("u1,", &["u1", ""])]
    fn parse_keeps_raw_tokens(#[case] raw: &str, #[case] expected: &[&str]) {
        let ids = UserMetaIds::parse(raw).expect("non-empty list");
        assert_eq!(ids.iter().collect::<Vec<_>>(), expected);
        assert_eq!(ids.len(), expected.len());
        assert!(!ids.is_empty());
    }

    #[test]
    fn parse_rejects_empty_value() {
        assert_eq!(UserMetaIds::parse(""), Err(UserMetaIdsError::Empty));
    }

    #[test]
    fn contains_matches_exact_tokens_only() {
        let ids = UserMetaIds::parse("u1, u2").expect("ids");
        assert!(ids.contains("u1"));
        assert!(ids.contains(" u2"));
        assert!(!ids.contains("u2"));
    }

    #[test]
    fn new_rejects_empty_username() {
        assert_eq!(
            UserMeta::new("u1", ""),
            Err(UserMetaValidationError::EmptyUsername)
        );
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let meta = meta("u1", "alice");
        assert_eq!(meta.name(), None);
        assert_eq!(meta.avatar(), None);
        let meta = meta.with_name("Alice").with_avatar("a.png");
        assert_eq!(meta.name(), Some("Alice"));
        assert_eq!(meta.avatar(), Some("a.png"));
    }

    #[test]
    fn directory_collapses_duplicate_records() {
        let ids = UserMetaIds::parse("u1,u1,u2").expect("ids");
        let directory = UserMetaDirectory::from_records(
            &ids,
            [meta("u1", "first"), meta("u2", "bob"), meta("u1", "second")],
        );
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("u1").map(UserMeta::username), Some("second"));
    }

    #[test]
    fn directory_drops_unrequested_records() {
        let ids = UserMetaIds::parse("u1").expect("ids");
        let directory =
            UserMetaDirectory::from_records(&ids, [meta("u1", "alice"), meta("u3", "carol")]);
        let keys: Vec<_> = directory.iter().map(UserMeta::user_id).collect();
        assert_eq!(keys, ["u1"]);
    }

    #[test]
    fn empty_directory_when_nothing_found() {
        let ids = UserMetaIds::parse("ghost").expect("ids");
        let directory = UserMetaDirectory::from_records(&ids, Vec::new());
        assert!(directory.is_empty());
        assert_eq!(directory.into_iter().count(), 0);
    }
}
