use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
    /// Exposes the label lookup route under /api/salaries/lookup
    pub enable_diagnostics: bool,
}

/// SQLite file used when DATABASE_URL is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/salarios.db";

pub const DEFAULT_PORT: u16 = 5000;

impl Environment {
    fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Overwrite `target` when `key` is set and parses; malformed values keep the preset
fn env_override<T: FromStr>(key: &str, target: &mut T) {
    if let Some(value) = env::var(key).ok().and_then(|v| v.parse().ok()) {
        *target = value;
    }
}

impl AppConfig {
    /// Preset for APP_ENV, then individual env var overrides
    pub fn from_env() -> Self {
        let environment = Environment::from_app_env(env::var("APP_ENV").ok().as_deref());
        Self::preset(environment).with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = url;
        }
        env_override("DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        env_override("DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);
        env_override("DATABASE_ENABLE_QUERY_LOGGING", &mut self.database.enable_query_logging);

        // PORT is honoured for hosts that only set the generic variable
        env_override("PORT", &mut self.api.port);
        env_override("SALARY_API_PORT", &mut self.api.port);
        env_override("API_ENABLE_REQUEST_LOGGING", &mut self.api.enable_request_logging);
        env_override("API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);
        env_override("API_ENABLE_DIAGNOSTICS", &mut self.api.enable_diagnostics);

        self
    }

    pub fn development() -> Self {
        Self::preset(Environment::Development)
    }

    fn preset(environment: Environment) -> Self {
        // (pool size, connect timeout secs, body limit, verbose)
        let (max_connections, connection_timeout, max_request_size_bytes, verbose) = match environment {
            Environment::Development => (5, 30, 1024 * 1024, true),
            Environment::Staging => (10, 10, 256 * 1024, true),
            Environment::Production => (20, 5, 64 * 1024, false),
        };

        Self {
            environment,
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections,
                connection_timeout,
                enable_query_logging: verbose,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                enable_request_logging: verbose,
                max_request_size_bytes,
                enable_diagnostics: verbose,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
