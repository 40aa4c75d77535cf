use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL. When unset the service runs on the in-memory store.
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub orders: OrderListConfig,
}

/// Log output. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub format: LogFormat,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "./logs".to_string(),
            file: "storefront.log".to_string(),
            format: LogFormat::Text,
            rotation: LogRotation::Daily,
        }
    }
}

/// `text` also echoes to stdout; `json` writes the file only.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Context token signing
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl SessionConfig {
    /// Lifetime of an issued context token; at least one hour.
    pub fn token_ttl(&self) -> Result<chrono::Duration> {
        if self.token_ttl_hours < 1 {
            bail!("session.token_ttl_hours must be at least 1, got {}", self.token_ttl_hours);
        }
        chrono::Duration::try_hours(self.token_ttl_hours)
            .with_context(|| format!("session.token_ttl_hours out of range: {}", self.token_ttl_hours))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-context-token-secret".to_string(),
            token_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderListConfig {
    pub default_limit: u32,
}

impl Default for OrderListConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.session.jwt_secret = secret;
        }
        config
            .session
            .token_ttl()
            .with_context(|| format!("Invalid session config in {}", config_path))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
