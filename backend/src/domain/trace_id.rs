//! Request correlation identifier.
//!
//! Every inbound request runs inside a [`TraceId::scope`] so errors and log
//! lines raised anywhere below the middleware can be tied back to the
//! response that carried them. The value lives in Tokio task-local storage
//! and is not inherited by spawned tasks; wrap spawned work in
//! [`TraceId::scope`] explicitly.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT_TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use storefront::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().expect("uuid");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT_TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` installed as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT_TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scope_installs_identifier_for_nested_awaits() {
        let id = TraceId::random();
        let seen = TraceId::scope(id, async {
            tokio::task::yield_now().await;
            TraceId::current()
        })
        .await;
        assert_eq!(seen, Some(id));
    }

    #[tokio::test]
    async fn current_is_empty_outside_a_scope() {
        assert_eq!(TraceId::current(), None);
    }

    #[test]
    fn display_and_parse_agree() {
        let id = TraceId::random();
        let parsed: TraceId = id.to_string().parse().expect("parse trace id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_non_uuid_text() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}
