pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod http;
pub mod qr;
pub mod selection;

#[cfg(test)]
pub mod test_support;
