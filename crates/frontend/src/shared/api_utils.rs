//! API utilities for frontend-backend communication
//!
//! Provides helpers for locating the backend and reading navigation context.

/// Get the base URL for API requests
///
/// Used when the configuration leaves `api.base_url` empty: the backend is
/// then expected behind the same origin as the page.
///
/// # Returns
/// - Origin like "https://pay.example.com"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}", protocol, host)
}

/// Current query string including the leading `?`, or empty
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Path segment escaped for use inside an API URL
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
