//! Configuration management for the Refinery Operations Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Outbound notification webhook configuration
    pub webhook: WebhookConfig,

    /// Notification trigger thresholds
    pub alerts: AlertConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    /// Whether alert notifications are forwarded to the webhook
    pub enabled: bool,

    /// Webhook endpoint URL
    pub endpoint: String,

    /// Shared secret for signing webhook payloads
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Tank fill percentage below which a low-stock alert is raised
    pub low_stock_percent: u32,

    /// Days a pending order may sit before a stale-order warning
    pub stale_order_days: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("ROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "postgres://localhost/refinery_ops")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("webhook.enabled", false)?
            .set_default("webhook.endpoint", "")?
            .set_default("webhook.secret", "")?
            .set_default("alerts.low_stock_percent", 20)?
            .set_default("alerts.stale_order_days", 7)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ROP_ prefix)
            .add_source(
                Environment::with_prefix("ROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
