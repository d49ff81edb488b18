//! Копирование ссылки на оплату и идентификаторов платежа в буфер обмена

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Copy text via the async Clipboard API, then run `on_copied`
///
/// Failures (no window, permission denied) are logged and `on_copied` is skipped.
pub fn copy_text<F>(text: &str, on_copied: F)
where
    F: FnOnce() + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            log::warn!("clipboard: no window");
            return;
        };
        let promise = window.navigator().clipboard().write_text(&text);
        match JsFuture::from(promise).await {
            Ok(_) => on_copied(),
            Err(e) => log::warn!("clipboard write failed: {:?}", e),
        }
    });
}
