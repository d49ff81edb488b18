//! HTTP plumbing shared by the backend services
//!
//! Requests are plain values so the auth interceptor can clone and re-send
//! them; the browser transport is a thin layer over `gloo-net`.

use async_trait::async_trait;
use contracts::shared::envelope::ErrorBody;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    /// Sets a header, replacing any existing value (names are case-insensitive).
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        let mut request = self.header("Content-Type", "application/json");
        request.body = Some(body);
        Ok(request)
    }

    pub fn form(self, body: String) -> Self {
        let mut request = self.header("Content-Type", "application/x-www-form-urlencoded");
        request.body = Some(body);
        request
    }

    /// Copy of the request carrying `Authorization: Bearer <token>`.
    pub fn with_bearer(&self, token: &str) -> Self {
        self.clone()
            .header("Authorization", &format!("Bearer {}", token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

pub const STATUS_UNAUTHORIZED: u16 = 401;

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns non-2xx responses into [`ApiError::Http`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ApiError::Http {
                status: self.status,
                message: ErrorBody::message_from(&self.body),
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Message for the guest: the backend's own message when it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Browser fetch via `gloo-net`
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_replaces_case_insensitively() {
        let request = ApiRequest::get("/x")
            .header("authorization", "Bearer a")
            .with_bearer("b");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header_value("Authorization"), Some("Bearer b"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = ApiRequest::post("/x")
            .json(&serde_json::json!({"amount": 10}))
            .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"amount":10}"#));
    }

    #[test]
    fn test_error_for_status_keeps_backend_message() {
        let response = ApiResponse {
            status: 422,
            body: r#"{"success": false, "message": "Amount exceeds balance"}"#.into(),
        };
        let err = response.error_for_status().unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                message: Some("Amount exceeds balance".into())
            }
        );
        assert_eq!(err.user_message("fallback"), "Amount exceeds balance");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("fallback"),
            "fallback"
        );
    }
}
