//! Process-wide services: configuration, authorized API client and the
//! backend services built on it.
//!
//! The client holds `Rc` state and cannot live in Leptos context (which
//! requires `Send + Sync`), so the context is kept in a thread-local and
//! installed once before the app is mounted.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::domain::a001_reservation::api::ReservationService;
use crate::domain::a004_payment_link::api::PaymentService;
use crate::shared::config::AppConfig;
use crate::shared::http::HttpTransport;
use crate::system::auth::interceptor::ApiClient;
use crate::system::auth::storage::TokenStore;

#[derive(Clone)]
pub struct AppGlobalContext {
    pub config: Rc<AppConfig>,
    pub client: ApiClient,
    pub reservations: ReservationService,
    pub payments: PaymentService,
}

impl AppGlobalContext {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        store: Rc<dyn TokenStore>,
    ) -> Self {
        let client = ApiClient::new(transport, store, config.api.clone());
        Self {
            config: Rc::new(config),
            reservations: ReservationService::new(client.clone()),
            payments: PaymentService::new(client.clone()),
            client,
        }
    }
}

thread_local! {
    static APP_CONTEXT: OnceCell<AppGlobalContext> = const { OnceCell::new() };
}

pub fn install_app_context(context: AppGlobalContext) {
    APP_CONTEXT.with(|cell| {
        if cell.set(context).is_err() {
            log::warn!("AppGlobalContext already installed, keeping the first one");
        }
    });
}

pub fn use_app_context() -> AppGlobalContext {
    APP_CONTEXT
        .with(|cell| cell.get().cloned())
        .expect("AppGlobalContext not installed (install it before mounting the app)")
}
