//! Shared helpers for the HTTP integration tests.
//!
//! Each file under `tests/` compiles as its own crate and uses a subset of
//! these doubles.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use storefront::Trace;
use storefront::domain::ports::{
    FixtureProductDetailQuery, InMemoryUserMetaRepository, UserMetaRepository,
    UserMetaRepositoryError,
};
use storefront::domain::{UserMeta, UserMetaIds, UserMetaService};
use storefront::inbound::http;
use storefront::inbound::http::error::route_not_found;
use storefront::inbound::http::state::HttpState;

/// Store answering every query with a connection failure.
pub struct FailingUserMetaRepository;

#[async_trait]
impl UserMetaRepository for FailingUserMetaRepository {
    async fn find_by_user_ids(
        &self,
        _ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError> {
        Err(UserMetaRepositoryError::connection("connection refused"))
    }
}

/// In-memory store that records how often it was queried.
#[derive(Default)]
pub struct CountingUserMetaRepository {
    inner: InMemoryUserMetaRepository,
    calls: AtomicUsize,
}

impl CountingUserMetaRepository {
    pub fn new(records: impl IntoIterator<Item = UserMeta>) -> Self {
        Self {
            inner: InMemoryUserMetaRepository::new(records),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserMetaRepository for CountingUserMetaRepository {
    async fn find_by_user_ids(
        &self,
        ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_user_ids(ids).await
    }
}

/// Sets its flag when dropped, standing in for an open cursor.
struct CursorGuard(Arc<AtomicBool>);

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Store whose query never completes. The flag flips once the pending
/// query is dropped.
#[derive(Default)]
pub struct StalledUserMetaRepository {
    started: AtomicBool,
    released: Arc<AtomicBool>,
}

impl StalledUserMetaRepository {
    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserMetaRepository for StalledUserMetaRepository {
    async fn find_by_user_ids(
        &self,
        _ids: &UserMetaIds,
    ) -> Result<Vec<UserMeta>, UserMetaRepositoryError> {
        let _cursor = CursorGuard(Arc::clone(&self.released));
        self.started.store(true, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(Vec::new())
    }
}

/// The profile used by most scenarios.
pub fn alice() -> UserMeta {
    UserMeta::new("u1", "alice")
        .expect("valid user")
        .with_name("Alice")
        .with_avatar("a.png")
}

/// HTTP state over `repository` with the default lookup deadline.
pub fn state_with(repository: Arc<dyn UserMetaRepository>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(UserMetaService::new(repository)),
        Arc::new(FixtureProductDetailQuery),
    ))
}

/// Application mounting the storefront routes the way the server does.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(http::configure)
        .default_service(web::to(route_not_found))
}
