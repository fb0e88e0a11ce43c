//! User metadata handler.
//!
//! ```text
//! GET /users/meta?ids=u1,u2
//! ```

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, UserMeta, UserMetaDirectory, UserMetaIds};
use crate::inbound::http::ApiResult;
use crate::inbound::http::respond::{ErrorBody, json_response};
use crate::inbound::http::state::HttpState;

/// Message returned when `ids` is absent or empty.
pub const MISSING_IDS_MESSAGE: &str = "Missing ids param";

/// Query parameters for `GET /users/meta`.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserMetaParams {
    /// Comma-joined user identifiers, used verbatim (no trimming). When the
    /// parameter repeats, the first occurrence is used.
    #[param(example = "u1,u2")]
    pub ids: Option<String>,
}

impl UserMetaParams {
    /// Pick the first `ids` value from decoded query pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            ids: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "ids").then_some(value)),
        }
    }
}

/// Public profile fields of one user.
///
/// Absent optional fields are rendered as empty strings so every entry has
/// the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserMetaEntry {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a.png")]
    pub avatar: String,
}

impl From<UserMeta> for UserMetaEntry {
    fn from(meta: UserMeta) -> Self {
        Self {
            username: meta.username().to_owned(),
            name: meta.name().unwrap_or_default().to_owned(),
            avatar: meta.avatar().unwrap_or_default().to_owned(),
        }
    }
}

/// Mapping from user identifier to profile fields. Unknown identifiers are
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserMetaResponse(pub HashMap<String, UserMetaEntry>);

impl From<UserMetaDirectory> for UserMetaResponse {
    fn from(directory: UserMetaDirectory) -> Self {
        Self(
            directory
                .into_iter()
                .map(|meta| (meta.user_id().to_owned(), UserMetaEntry::from(meta)))
                .collect(),
        )
    }
}

/// Resolve a batch of user identifiers to public profile metadata.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront::inbound::http::users::user_meta;
///
/// let app = App::new().service(user_meta);
/// ```
#[utoipa::path(
    get,
    path = "/users/meta",
    params(UserMetaParams),
    responses(
        (status = 200, description = "Profiles of the identifiers that were found", body = UserMetaResponse),
        (status = 400, description = "Missing ids param", body = ErrorBody),
        (status = 500, description = "DB query failed", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUserMeta"
)]
#[get("/users/meta")]
pub async fn user_meta(
    state: web::Data<HttpState>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let params = UserMetaParams::from_pairs(query.into_inner());
    let raw = params.ids.unwrap_or_default();
    let ids =
        UserMetaIds::parse(&raw).map_err(|_| Error::invalid_request(MISSING_IDS_MESSAGE))?;
    let directory = state.user_meta.lookup(&ids).await?;
    Ok(json_response(
        StatusCode::OK,
        &UserMetaResponse::from(directory),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    #[case(&[("ids", "u1"), ("ids", "u2")], Some("u1"))]
    #[case(&[("other", "x"), ("ids", "u1,u2")], Some("u1,u2"))]
    #[case(&[("ids", ""), ("ids", "u1")], Some(""))]
    #[case(&[("id", "u1")], None)]
    #[case(&[], None)]
    fn first_ids_value_wins(#[case] raw: &[(&str, &str)], #[case] expected: Option<&str>) {
        let params = UserMetaParams::from_pairs(pairs(raw));
        assert_eq!(params.ids.as_deref(), expected);
    }

    #[test]
    fn entry_renders_absent_fields_as_empty_strings() {
        let meta = UserMeta::new("u1", "alice").expect("valid");
        let entry = UserMetaEntry::from(meta);
        assert_eq!(
            serde_json::to_value(entry).expect("json"),
            json!({ "username": "alice", "name": "", "avatar": "" })
        );
    }

    #[test]
    fn response_is_a_plain_object_keyed_by_user_id() {
        let mut directory = UserMetaDirectory::default();
        directory.insert(
            UserMeta::new("u1", "alice")
                .expect("valid")
                .with_name("Alice")
                .with_avatar("a.png"),
        );
        let response = UserMetaResponse::from(directory);
        assert_eq!(
            serde_json::to_value(response).expect("json"),
            json!({ "u1": { "username": "alice", "name": "Alice", "avatar": "a.png" } })
        );
    }

    #[test]
    fn empty_directory_renders_empty_object() {
        let response = UserMetaResponse::from(UserMetaDirectory::default());
        assert_eq!(serde_json::to_string(&response).expect("json"), "{}");
    }
}
