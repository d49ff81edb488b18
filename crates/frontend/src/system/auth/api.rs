use base64::{engine::general_purpose, Engine as _};
use contracts::system::auth::{TokenRequest, TokenResponse};

use crate::shared::config::ApiConfig;
use crate::shared::http::{ApiError, ApiRequest, HttpTransport};

/// Token endpoint; requests to it bypass the interceptor
pub const TOKEN_PATH: &str = "/oauth/v1/tokens";

/// Builds the client-credentials grant request
pub fn token_request(config: &ApiConfig) -> Result<ApiRequest, ApiError> {
    let body = serde_qs::to_string(&TokenRequest::client_credentials(&config.scope))
        .map_err(|e| ApiError::Config(format!("Failed to encode token request: {}", e)))?;
    let credentials = general_purpose::STANDARD
        .encode(format!("{}:{}", config.client_id, config.client_secret));

    Ok(ApiRequest::post(config.url(TOKEN_PATH))
        .header("x-app-key", &config.app_key)
        .header("enterpriseId", &config.enterprise_id)
        .header("Authorization", &format!("Basic {}", credentials))
        .form(body))
}

/// Exchange client credentials for a bearer token
pub async fn request_token(
    transport: &dyn HttpTransport,
    config: &ApiConfig,
) -> Result<TokenResponse, ApiError> {
    let response = transport
        .send(token_request(config)?)
        .await?
        .error_for_status()?;
    response.json::<TokenResponse>()
}

pub fn is_token_request(request: &ApiRequest) -> bool {
    request.url.contains(TOKEN_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::test_api_config;

    #[test]
    fn test_token_request_headers_and_body() {
        let request = token_request(&test_api_config()).unwrap();
        assert_eq!(request.url, "https://api.test/oauth/v1/tokens");
        assert_eq!(
            request.header_value("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.header_value("x-app-key"), Some("app-key"));
        assert_eq!(request.header_value("enterpriseId"), Some("ENT"));
        // base64("client:secret")
        assert_eq!(
            request.header_value("Authorization"),
            Some("Basic Y2xpZW50OnNlY3JldA==")
        );
        let body = request.body.unwrap();
        assert!(body.starts_with("grant_type=client_credentials&scope="));
        assert!(is_token_request(&ApiRequest::get("https://api.test/oauth/v1/tokens")));
    }
}
