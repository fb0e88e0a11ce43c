//! MongoDB-backed `UserMetaRepository`.
//!
//! Runs a single `$in` query on `userid` with a four-field projection and
//! streams the cursor. Documents that do not decode into [`UserMeta`] are
//! logged at debug level and skipped; the rest of the batch is kept.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::StoreHandles;
use crate::domain::ports::{UserMetaRepository, UserMetaRepositoryError};
use crate::domain::{UserMeta, UserMetaIds, UserMetaValidationError};

/// Field holding the user key in the `users` collection.
const USER_ID_FIELD: &str = "userid";

/// Raw shape of a projected user document.
#[derive(Debug, Deserialize)]
struct UserMetaDocument {
    userid: String,
    username: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Debug, Error)]
enum DecodeError {
    #[error("malformed user document: {0}")]
    Shape(String),
    #[error(transparent)]
    Invalid(#[from] UserMetaValidationError),
}

/// Repository reading user metadata from the `users` collection.
#[derive(Debug, Clone)]
pub struct MongoUserMetaRepository {
    users: Collection<Document>,
    max_time: Option<Duration>,
}

impl MongoUserMetaRepository {
    /// Read from the `users` handle of `handles`.
    #[must_use]
    pub fn new(handles: &StoreHandles) -> Self {
        Self {
            users: handles.users().clone(),
            max_time: None,
        }
    }

    /// Ask the server to abandon queries running longer than `max_time`.
    ///
    /// This complements the client-side deadline so an abandoned request
    /// does not keep the server busy.
    #[must_use]
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }
}

fn membership_filter(ids: &UserMetaIds) -> Document {
    let values: Vec<Bson> = ids.iter().map(|id| Bson::String(id.to_owned())).collect();
    let mut filter = Document::new();
    filter.insert(USER_ID_FIELD, doc! { "$in": values });
    filter
}

fn user_meta_projection() -> Document {
    doc! {
        "_id": 0,
        "userid": 1,
        "username": 1,
        "name": 1,
        "avatar": 1,
    }
}

fn decode_user_meta(document: Document) -> Result<UserMeta, DecodeError> {
    let raw: UserMetaDocument = mongodb::bson::from_document(document)
        .map_err(|err| DecodeError::Shape(err.to_string()))?;
    let mut meta = UserMeta::new(raw.userid, raw.username)?;
    if let Some(name) = raw.name {
        meta = meta.with_name(name);
    }
    if let Some(avatar) = raw.avatar {
        meta = meta.with_avatar(avatar);
    }
    Ok(meta)
}

#[async_trait]
impl UserMetaRepository for MongoUserMetaRepository {
    async fn find_by_user_ids(
        &self,
        ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError> {
        let mut find = self
            .users
            .find(membership_filter(ids))
            .projection(user_meta_projection());
        if let Some(max_time) = self.max_time {
            find = find.max_time(max_time);
        }

        // The cursor is dropped on every return path below, including early
        // returns and cancellation of this future; the driver then kills it
        // server-side.
        let mut cursor = find
            .await
            .map_err(|err| UserMetaRepositoryError::connection(err.to_string()))?;

        let mut found = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|err| UserMetaRepositoryError::query(err.to_string()))?
        {
            match decode_user_meta(document) {
                Ok(meta) => found.push(meta),
                Err(err) => debug!(error = %err, "skipping undecodable user document"),
            }
        }
        Ok(found)
    }
}
