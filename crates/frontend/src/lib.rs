pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::layout::global_context::{install_app_context, AppGlobalContext};
use crate::routes::routes::AppRoute;
use crate::shared::config::load_config;
use crate::shared::http::GlooTransport;
use crate::system::auth::storage::default_store;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate; the configured level is applied once loaded
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    spawn_local(async {
        let config = load_config().await;
        log::set_max_level(config.logging.level_filter());

        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        log::info!("Guest pay portal starting on {:?}", AppRoute::from_path(&path));

        install_app_context(AppGlobalContext::new(
            config,
            Rc::new(GlooTransport),
            default_store(),
        ));
        leptos::mount::mount_to_body(app::App);
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
