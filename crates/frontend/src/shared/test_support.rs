//! In-memory backend for interceptor and service tests.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::shared::config::ApiConfig;
use crate::shared::http::{ApiError, ApiRequest, ApiResponse, HttpTransport};
use crate::system::auth::api::is_token_request;
use crate::system::auth::interceptor::ApiClient;
use crate::system::auth::storage::TokenStore;

pub fn test_api_config() -> ApiConfig {
    ApiConfig {
        base_url: "https://api.test".into(),
        app_key: "app-key".into(),
        enterprise_id: "ENT".into(),
        client_id: "client".into(),
        client_secret: "secret".into(),
        scope: "urn:test".into(),
    }
}

pub fn client_with(backend: &Rc<FakeBackend>, store: Rc<dyn TokenStore>) -> ApiClient {
    ApiClient::new(backend.clone(), store, test_api_config())
}

pub fn run_local<F: Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

/// Returns `Pending` once so other local tasks get to run.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Issues `token-N` from the token endpoint and accepts only the latest one.
#[derive(Default)]
pub struct FakeBackend {
    token_calls: Cell<u32>,
    token_status: Cell<Option<u16>>,
    accepted: RefCell<Option<String>>,
    reject_all: Cell<bool>,
    routes: RefCell<Vec<(String, u16, String)>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn route(&self, fragment: &str, status: u16, body: &str) {
        self.routes
            .borrow_mut()
            .push((fragment.to_string(), status, body.to_string()));
    }

    pub fn accept_token(&self, token: &str) {
        *self.accepted.borrow_mut() = Some(token.to_string());
    }

    pub fn reject_everything(&self) {
        self.reject_all.set(true);
    }

    pub fn fail_token_endpoint(&self, status: u16) {
        self.token_status.set(Some(status));
    }

    pub fn token_calls(&self) -> u32 {
        self.token_calls.get()
    }

    pub fn sent_data_requests(&self) -> Vec<ApiRequest> {
        self.sent
            .borrow()
            .iter()
            .filter(|r| !is_token_request(r))
            .cloned()
            .collect()
    }

    fn issue_token(&self) -> ApiResponse {
        let n = self.token_calls.get() + 1;
        self.token_calls.set(n);
        if let Some(status) = self.token_status.get() {
            return ApiResponse {
                status,
                body: String::new(),
            };
        }
        let token = format!("token-{}", n);
        self.accept_token(&token);
        ApiResponse {
            status: 200,
            body: format!(
                r#"{{"access_token": "{}", "token_type": "Bearer", "expires_in": 3600}}"#,
                token
            ),
        }
    }

    fn answer(&self, request: &ApiRequest) -> ApiResponse {
        let expected = self
            .accepted
            .borrow()
            .as_ref()
            .map(|t| format!("Bearer {}", t));
        if self.reject_all.get() || request.header_value("Authorization") != expected.as_deref() {
            return ApiResponse {
                status: 401,
                body: String::new(),
            };
        }

        self.routes
            .borrow()
            .iter()
            .filter(|(fragment, _, _)| request.url.contains(fragment.as_str()))
            .max_by_key(|(fragment, _, _)| fragment.len())
            .map(|(_, status, body)| ApiResponse {
                status: *status,
                body: body.clone(),
            })
            .unwrap_or(ApiResponse {
                status: 404,
                body: String::new(),
            })
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        YieldNow(false).await;
        if is_token_request(&request) {
            Ok(self.issue_token())
        } else {
            Ok(self.answer(&request))
        }
    }
}
