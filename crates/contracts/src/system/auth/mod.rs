use serde::{Deserialize, Serialize};

/// Form body of the client-credentials grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub scope: String,
}

impl TokenRequest {
    pub fn client_credentials(scope: &str) -> Self {
        Self {
            grant_type: "client_credentials".to_string(),
            scope: scope.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
}

impl TokenResponse {
    /// Absolute expiry in epoch milliseconds, counted from `now_ms`.
    pub fn expiry_ms(&self, now_ms: i64) -> i64 {
        now_ms + self.expires_in * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_from_now() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#,
        )
        .unwrap();
        assert_eq!(response.expiry_ms(1_000), 3_601_000);
    }
}
