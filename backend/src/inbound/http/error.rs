//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers return
//! it directly: the status comes from the [`ErrorCode`] and the body is the
//! `{"error": message}` envelope.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, error::QueryPayloadError, web};
use tracing::{debug, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::respond;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = respond::error_response(self.status_code(), self.message());
        if let Some(id) = self.trace_id() {
            match HeaderValue::from_str(id) {
                Ok(value) => {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(err) => warn!(error = %err, "trace id is not a valid header value"),
            }
        }
        response
    }
}

/// Query extractor settings turning malformed query strings into the JSON
/// error envelope instead of actix's plain-text default.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(reject_query)
}

fn reject_query(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected malformed query string");
    Error::invalid_request("Invalid query string").into()
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TraceId;
    use crate::inbound::http::respond::ErrorBody;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn render(error: &Error) -> (StatusCode, Option<String>, ErrorBody) {
        let response = error.error_response();
        let status = response.status();
        let trace = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body()).await.expect("body");
        let body = serde_json::from_slice(&bytes).expect("error envelope");
        (status, trace, body)
    }

    #[rstest]
    #[case(Error::invalid_request("Missing ids param"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("Not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("DB query failed"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn renders_status_and_envelope(#[case] error: Error, #[case] status: StatusCode) {
        let (actual_status, trace, body) = render(&error).await;
        assert_eq!(actual_status, status);
        assert_eq!(body.error, error.message());
        assert!(trace.is_none());
    }

    #[actix_web::test]
    async fn echoes_trace_id_header() {
        let id = TraceId::random();
        let error = TraceId::scope(id, async { Error::internal("DB query failed") }).await;
        let (_, trace, _) = render(&error).await;
        assert_eq!(trace, Some(id.to_string()));
    }

    #[derive(serde::Deserialize)]
    struct Page {
        #[expect(dead_code, reason = "only the extraction outcome matters")]
        page: u32,
    }

    #[actix_web::test]
    async fn malformed_query_gets_json_bad_request() {
        use actix_web::{App, test};

        let app = test::init_service(App::new().app_data(query_config()).route(
            "/",
            web::get().to(|_: web::Query<Page>| async { HttpResponse::NoContent().finish() }),
        ))
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/?page=abc").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(res).await;
        assert_eq!(body.error, "Invalid query string");
    }

    #[actix_web::test]
    async fn unmatched_route_is_not_found() {
        let err = route_not_found().await.expect_err("always an error");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
