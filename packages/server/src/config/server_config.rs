use serde::{Deserialize, Serialize};
use std::env;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

static SERVER_CONFIG: OnceLock<ServerConfig> = OnceLock::new();

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint, Open-Meteo compatible.
    pub forecast_url: String,
    pub cache_ttl_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            cache_ttl_secs: 900, // 15 minutes
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_name: String,
    /// Public origin used when building links in emails.
    pub base_url: String,
    pub port: u16,
    pub database_url: String,
    pub database_namespace: String,
    pub database_name: String,
    pub dashboard_path: String,
    pub environment: String,
    pub session_ttl_secs: i64,
    pub auth_code_ttl_secs: u64,
    pub one_time_code_ttl_secs: u64,
    pub email_config: EmailConfig,
    pub weather: WeatherConfig,
}

impl ServerConfig {
    pub fn init() -> Result<&'static ServerConfig, ConfigError> {
        Ok(SERVER_CONFIG.get_or_init(|| {
            let server_name = env::var("MOKKI_SERVER_NAME").unwrap_or_else(|_| {
                warn!("MOKKI_SERVER_NAME not set, defaulting to localhost (development only)");
                "localhost".to_string()
            });

            let port = env::var("MOKKI_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080);

            let email_config = EmailConfig {
                smtp_server: env::var("SMTP_SERVER").unwrap_or_else(|_| "localhost".to_string()),
                smtp_port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .unwrap_or(587),
                smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
                smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from_address: env::var("FROM_EMAIL")
                    .unwrap_or_else(|_| format!("noreply@{}", server_name)),
                enabled: env::var("EMAIL_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            };

            let weather = WeatherConfig {
                forecast_url: env::var("WEATHER_API_URL")
                    .unwrap_or_else(|_| WeatherConfig::default().forecast_url),
                cache_ttl_secs: env::var("WEATHER_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(900),
            };

            ServerConfig {
                base_url: env::var("MOKKI_BASE_URL")
                    .unwrap_or_else(|_| format!("http://{}:{}", server_name, port)),
                server_name,
                port,
                database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "memory".to_string()),
                database_namespace: env::var("MOKKI_DB_NAMESPACE")
                    .unwrap_or_else(|_| "mokki".to_string()),
                database_name: env::var("MOKKI_DB_DATABASE")
                    .unwrap_or_else(|_| "house".to_string()),
                dashboard_path: env::var("MOKKI_DASHBOARD_PATH")
                    .unwrap_or_else(|_| "/dashboard".to_string()),
                environment: env::var("MOKKI_ENV")
                    .unwrap_or_else(|_| "development".to_string()),
                session_ttl_secs: env::var("MOKKI_SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(604_800), // 7 days
                auth_code_ttl_secs: env::var("MOKKI_AUTH_CODE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
                one_time_code_ttl_secs: env::var("MOKKI_OTP_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(86_400),
                email_config,
                weather,
            }
        }))
    }

    pub fn get() -> Option<&'static ServerConfig> {
        SERVER_CONFIG.get()
    }
}
