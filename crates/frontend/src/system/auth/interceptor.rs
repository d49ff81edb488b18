//! Bearer-token interceptor
//!
//! Every backend call goes through [`ApiClient::execute`]. A missing or
//! expired token is obtained lazily before the first send; a 401 triggers a
//! refresh and the request is re-sent, at most [`MAX_AUTH_RETRIES`] times.
//! Refreshes are single-flight: callers arriving while one is in progress
//! await the same shared future.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api::{self, is_token_request};
use super::storage::{now_ms, StoredToken, TokenStore};
use crate::shared::config::ApiConfig;
use crate::shared::http::{ApiError, ApiRequest, ApiResponse, HttpTransport, STATUS_UNAUTHORIZED};

pub const MAX_AUTH_RETRIES: u32 = 2;

type PendingRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Valid,
    Expired,
    Refreshing,
    Failed,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    store: Rc<dyn TokenStore>,
    config: Rc<ApiConfig>,
    pending: Rc<RefCell<Option<PendingRefresh>>>,
    refresh_failed: Rc<Cell<bool>>,
}

impl ApiClient {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        store: Rc<dyn TokenStore>,
        config: ApiConfig,
    ) -> Self {
        Self {
            transport,
            store,
            config: Rc::new(config),
            pending: Rc::new(RefCell::new(None)),
            refresh_failed: Rc::new(Cell::new(false)),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn token_state(&self) -> TokenState {
        if self.pending.borrow().is_some() {
            return TokenState::Refreshing;
        }
        if self.refresh_failed.get() {
            return TokenState::Failed;
        }
        match self.store.load() {
            None => TokenState::NoToken,
            Some(token) if token.is_expired(now_ms()) => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }

    /// Send a request with the bearer token attached
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if is_token_request(&request) {
            return self.transport.send(request).await;
        }

        let mut token = self.valid_token().await?;
        let mut retries = 0;
        loop {
            let response = self.transport.send(request.with_bearer(&token)).await?;
            if response.status != STATUS_UNAUTHORIZED {
                return Ok(response);
            }

            if retries >= MAX_AUTH_RETRIES {
                log::warn!(
                    "401 for {} after {} retries, clearing token",
                    request.url,
                    retries
                );
                self.store.clear();
                return Err(ApiError::Unauthorized(
                    "Maximum retry attempts reached".to_string(),
                ));
            }

            retries += 1;
            log::info!(
                "401 for {}, retry {}/{}",
                request.url,
                retries,
                MAX_AUTH_RETRIES
            );
            token = self.token_after_rejection(&token).await?;
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute(request).await?.error_for_status()?.json()
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        body: &B,
    ) -> Result<T, ApiError> {
        self.get_json(request.json(body)?).await
    }

    async fn valid_token(&self) -> Result<String, ApiError> {
        if let Some(pending) = self.pending_refresh() {
            return pending.await;
        }
        match self.store.load() {
            Some(token) if !token.is_expired(now_ms()) => Ok(token.access_token),
            _ => self.refresh().await,
        }
    }

    /// Token to retry with after `rejected` got a 401.
    ///
    /// If another request already replaced the token, that one is reused.
    async fn token_after_rejection(&self, rejected: &str) -> Result<String, ApiError> {
        if let Some(pending) = self.pending_refresh() {
            return pending.await;
        }
        match self.store.load() {
            Some(token) if token.access_token != rejected && !token.is_expired(now_ms()) => {
                Ok(token.access_token)
            }
            _ => self.refresh().await,
        }
    }

    fn pending_refresh(&self) -> Option<PendingRefresh> {
        self.pending.borrow().clone()
    }

    fn refresh(&self) -> PendingRefresh {
        let mut slot = self.pending.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            return pending.clone();
        }

        let transport = self.transport.clone();
        let store = self.store.clone();
        let config = self.config.clone();
        let pending = self.pending.clone();
        let refresh_failed = self.refresh_failed.clone();

        let future = async move {
            log::info!("Requesting access token");
            let result = api::request_token(transport.as_ref(), &config).await;
            pending.borrow_mut().take();

            match result {
                Ok(response) => {
                    store.save(&StoredToken {
                        access_token: response.access_token.clone(),
                        expiry_ms: Some(response.expiry_ms(now_ms())),
                    });
                    refresh_failed.set(false);
                    Ok(response.access_token)
                }
                Err(e) => {
                    log::error!("Token refresh failed: {}", e);
                    store.clear();
                    refresh_failed.set(true);
                    Err(e)
                }
            }
        }
        .boxed_local()
        .shared();

        *slot = Some(future.clone());
        future
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{client_with, run_local, FakeBackend};
    use crate::system::auth::storage::MemoryTokenStore;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    fn valid_token(value: &str) -> StoredToken {
        StoredToken {
            access_token: value.to_string(),
            expiry_ms: Some(now_ms() + 3_600_000),
        }
    }

    fn data_request() -> ApiRequest {
        ApiRequest::get("https://api.test/reservation/H1/R1")
    }

    #[test]
    fn test_token_obtained_lazily_on_first_use() {
        let backend = FakeBackend::new();
        backend.route("/reservation/H1/R1", 200, r#"{"success": true}"#);
        let store = Rc::new(MemoryTokenStore::default());
        let client = client_with(&backend, store.clone());
        assert_eq!(client.token_state(), TokenState::NoToken);

        let response = run_local(client.execute(data_request())).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(backend.token_calls(), 1);
        assert_eq!(store.load().unwrap().access_token, "token-1");
        assert_eq!(client.token_state(), TokenState::Valid);
        let sent = backend.sent_data_requests();
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer token-1"));
    }

    #[test]
    fn test_valid_token_reused() {
        let backend = FakeBackend::new();
        backend.accept_token("seed");
        backend.route("/reservation/H1/R1", 200, "{}");
        let store = Rc::new(MemoryTokenStore::with_token(valid_token("seed")));
        let client = client_with(&backend, store);

        run_local(client.execute(data_request())).unwrap();
        run_local(client.execute(data_request())).unwrap();

        assert_eq!(backend.token_calls(), 0);
        assert_eq!(backend.sent_data_requests().len(), 2);
    }

    #[test]
    fn test_expired_token_refreshed_before_send() {
        let backend = FakeBackend::new();
        backend.accept_token("old");
        backend.route("/reservation/H1/R1", 200, "{}");
        let store = Rc::new(MemoryTokenStore::with_token(StoredToken {
            access_token: "old".into(),
            expiry_ms: Some(now_ms() - 1),
        }));
        let client = client_with(&backend, store);
        assert_eq!(client.token_state(), TokenState::Expired);

        run_local(client.execute(data_request())).unwrap();

        assert_eq!(backend.token_calls(), 1);
        // no request went out with the expired token
        let sent = backend.sent_data_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer token-1"));
    }

    #[test]
    fn test_concurrent_401s_share_one_refresh() {
        let backend = FakeBackend::new();
        // the stored token looks valid locally but the server has revoked it
        backend.accept_token("server-side-other");
        backend.route("/reservation/H1/R1", 200, "{}");
        let store = Rc::new(MemoryTokenStore::with_token(valid_token("revoked")));
        let client = client_with(&backend, store);

        let results = Rc::new(RefCell::new(Vec::new()));
        let mut pool = LocalPool::new();
        for _ in 0..3 {
            let client = client.clone();
            let results = results.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = client.execute(data_request()).await;
                    results.borrow_mut().push(result.map(|r| r.status));
                })
                .unwrap();
        }
        pool.run();

        assert_eq!(backend.token_calls(), 1);
        assert_eq!(*results.borrow(), vec![Ok(200), Ok(200), Ok(200)]);
    }

    #[test]
    fn test_concurrent_requests_on_expired_token_share_one_refresh() {
        let backend = FakeBackend::new();
        backend.route("/reservation/H1/R1", 200, "{}");
        let store = Rc::new(MemoryTokenStore::with_token(StoredToken {
            access_token: "old".into(),
            expiry_ms: Some(now_ms() - 1),
        }));
        let client = client_with(&backend, store.clone());

        let results = Rc::new(RefCell::new(Vec::new()));
        let mut pool = LocalPool::new();
        for _ in 0..4 {
            let client = client.clone();
            let results = results.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = client.execute(data_request()).await;
                    results.borrow_mut().push(result.map(|r| r.status));
                })
                .unwrap();
        }
        pool.run();

        assert_eq!(backend.token_calls(), 1);
        assert_eq!(*results.borrow(), vec![Ok(200); 4]);
        assert_eq!(store.load().unwrap().access_token, "token-1");
        assert!(backend
            .sent_data_requests()
            .iter()
            .all(|r| r.header_value("Authorization") == Some("Bearer token-1")));
    }

    #[test]
    fn test_third_consecutive_401_is_terminal() {
        let backend = FakeBackend::new();
        backend.reject_everything();
        let store = Rc::new(MemoryTokenStore::with_token(valid_token("seed")));
        let client = client_with(&backend, store.clone());

        let result = run_local(client.execute(data_request()));

        assert_eq!(
            result,
            Err(ApiError::Unauthorized(
                "Maximum retry attempts reached".into()
            ))
        );
        assert_eq!(backend.sent_data_requests().len(), 3);
        assert_eq!(backend.token_calls(), 2);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_failed_refresh_clears_token() {
        let backend = FakeBackend::new();
        backend.fail_token_endpoint(500);
        let store = Rc::new(MemoryTokenStore::with_token(StoredToken {
            access_token: "old".into(),
            expiry_ms: Some(now_ms() - 1),
        }));
        let client = client_with(&backend, store.clone());

        let result = run_local(client.execute(data_request()));

        assert!(matches!(result, Err(ApiError::Http { status: 500, .. })));
        assert_eq!(store.load(), None);
        assert_eq!(client.token_state(), TokenState::Failed);
        assert!(backend.sent_data_requests().is_empty());
    }

    #[test]
    fn test_token_request_bypasses_interceptor() {
        let backend = FakeBackend::new();
        let client = client_with(&backend, Rc::new(MemoryTokenStore::default()));

        let request = ApiRequest::post("https://api.test/oauth/v1/tokens");
        let response = run_local(client.execute(request)).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(backend.token_calls(), 1);
        assert_eq!(client.token_state(), TokenState::NoToken);
    }

    #[test]
    fn test_get_json_maps_backend_errors() {
        let backend = FakeBackend::new();
        backend.route(
            "/reservation/H1/R1",
            404,
            r#"{"success": false, "message": "Reservation not found"}"#,
        );
        let client = client_with(&backend, Rc::new(MemoryTokenStore::default()));

        let result: Result<serde_json::Value, _> = run_local(client.get_json(data_request()));

        assert_eq!(
            result,
            Err(ApiError::Http {
                status: 404,
                message: Some("Reservation not found".into())
            })
        );
    }
}
