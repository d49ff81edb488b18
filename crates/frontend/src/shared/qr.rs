//! Shareable payment link and its QR code image
//!
//! The QR image is rendered by an external service; we only build its URL.

use crate::shared::config::QrConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLink {
    pub url: String,
    pub qr_code: String,
}

impl GeneratedLink {
    pub fn new(url: String, qr: &QrConfig) -> Self {
        let qr_code = qr_code_url(qr, &url);
        Self { url, qr_code }
    }
}

pub fn qr_code_url(qr: &QrConfig, link: &str) -> String {
    format!(
        "{}?size={}x{}&data={}",
        qr.endpoint,
        qr.size,
        qr.size,
        urlencoding::encode(link)
    )
}
