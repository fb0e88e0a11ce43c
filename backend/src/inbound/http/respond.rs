//! Uniform JSON response emitters.
//!
//! Every body this service writes, success or failure, goes through
//! [`json_response`], so content type and encoding behaviour stay identical
//! across endpoints.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Error envelope written by [`error_response`].
///
/// Example JSON: `{"error":"Missing ids param"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    #[schema(example = "Missing ids param")]
    pub error: String,
}

/// Write `value` as JSON with the given status.
///
/// Encoding is best effort: if `value` cannot be serialised the status is
/// still sent, with an empty body, and the failure is logged.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use storefront::inbound::http::respond::json_response;
///
/// let response = json_response(StatusCode::OK, &serde_json::json!({ "ok": true }));
/// assert_eq!(response.status(), StatusCode::OK);
/// ```
pub fn json_response<T>(status: StatusCode, value: &T) -> HttpResponse
where
    T: Serialize + ?Sized,
{
    let mut builder = HttpResponse::build(status);
    builder.content_type(ContentType::json());
    match serde_json::to_vec(value) {
        Ok(body) => builder.body(body),
        Err(err) => {
            error!(error = %err, status = status.as_u16(), "failed to encode response body");
            builder.finish()
        }
    }
}

/// Write `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorBody {
            error: message.to_owned(),
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::header::CONTENT_TYPE;
    use serde::ser::Error as _;

    async fn body_of(response: HttpResponse) -> Vec<u8> {
        to_bytes(response.into_body())
            .await
            .expect("read body")
            .to_vec()
    }

    #[actix_web::test]
    async fn json_response_sets_status_type_and_body() {
        let value = BTreeMap::from([("u1", "alice")]);
        let response = json_response(StatusCode::CREATED, &value);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        assert_eq!(body_of(response).await, br#"{"u1":"alice"}"#);
    }

    #[actix_web::test]
    async fn error_response_wraps_message() {
        let response = error_response(StatusCode::BAD_REQUEST, "Missing ids param");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = serde_json::from_slice(&body_of(response).await).expect("json");
        assert_eq!(body.error, "Missing ids param");
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refuses to encode"))
        }
    }

    #[actix_web::test]
    async fn encode_failure_keeps_status_with_empty_body() {
        let response = json_response(StatusCode::OK, &Unencodable);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await.is_empty());
    }
}
