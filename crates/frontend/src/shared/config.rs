use gloo_net::http::Request;
use serde::Deserialize;

use crate::shared::api_utils::api_base;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub qr: QrConfig,
    #[serde(default)]
    pub support: SupportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Пусто: тот же origin, что и у страницы
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub enterprise_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QrConfig {
    pub endpoint: String,
    pub size: u32,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SupportConfig {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_scope() -> String {
    "urn:opc:hgbu:ws:__myscopes__".to_string()
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            size: 200,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL for an API path such as `/payment/deposit/generate`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Debug)
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
app_key = ""
enterprise_id = ""
client_id = ""
client_secret = ""

[qr]
endpoint = "https://api.qrserver.com/v1/create-qr-code/"
size = 200

[support]
email = ""

[logging]
level = "debug"
"#;

/// Path the deployment may serve an override from
const CONFIG_PATH: &str = "/config.toml";

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

pub fn default_config() -> AppConfig {
    // Embedded constant, covered by test_default_config_loads
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Embedded config is invalid: {}", e);
        AppConfig {
            api: ApiConfig {
                base_url: String::new(),
                app_key: String::new(),
                enterprise_id: String::new(),
                client_id: String::new(),
                client_secret: String::new(),
                scope: default_scope(),
            },
            qr: QrConfig::default(),
            support: SupportConfig::default(),
            logging: LoggingConfig::default(),
        }
    })
}

/// Load configuration
///
/// Search order:
/// 1. `config.toml` served next to the bundle (for production)
/// 2. Falls back to embedded default config
///
/// An empty `api.base_url` resolves to the page origin.
pub async fn load_config() -> AppConfig {
    let mut config = match fetch_override().await {
        Some(contents) => match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                log::warn!("{} is invalid ({}), using defaults", CONFIG_PATH, e);
                default_config()
            }
        },
        None => {
            log::info!("Using default embedded configuration");
            default_config()
        }
    };

    if config.api.base_url.trim().is_empty() {
        config.api.base_url = api_base();
    }
    config
}

async fn fetch_override() -> Option<String> {
    let response = Request::get(CONFIG_PATH).send().await.ok()?;
    if !response.ok() {
        log::warn!("{} not found: HTTP {}", CONFIG_PATH, response.status());
        return None;
    }
    response.text().await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.scope, "urn:opc:hgbu:ws:__myscopes__");
        assert_eq!(config.qr.size, 200);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_override_with_missing_sections() {
        let config = parse_config(
            r#"
            [api]
            base_url = "https://pay.example.com/api/"
            app_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.qr, QrConfig::default());
        assert_eq!(config.support.email, "");
        assert_eq!(
            config.api.url("/payment/adhoc/generate"),
            "https://pay.example.com/api/payment/adhoc/generate"
        );
    }

    #[test]
    fn test_unknown_log_level_defaults_to_debug() {
        let logging = LoggingConfig {
            level: "chatty".into(),
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        let logging = LoggingConfig {
            level: "warn".into(),
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
    }
}
