//! Global application configuration.
//!
//! A lazily initialized singleton populated from `.env` / environment
//! variables. Every binary and test reads configuration through the free
//! accessor functions at the bottom of this module.

use once_cell::sync::OnceCell;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unset variables fall back to development defaults so tests can run
    /// without an environment file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "classroom-live".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "sqlite::memory:".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Returns the global configuration, loading it on first access.
    pub fn global() -> &'static Self {
        CONFIG.get_or_init(Self::from_env)
    }
}

pub fn env() -> String {
    Config::global().env.clone()
}

pub fn project_name() -> String {
    Config::global().project_name.clone()
}

pub fn log_level() -> String {
    Config::global().log_level.clone()
}

pub fn log_file() -> String {
    Config::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    Config::global().log_to_stdout
}

pub fn database_path() -> String {
    Config::global().database_path.clone()
}

pub fn host() -> String {
    Config::global().host.clone()
}

pub fn port() -> u16 {
    Config::global().port
}
