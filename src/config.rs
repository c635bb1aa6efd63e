use crate::error::{Error, Result};
use crate::services::workflow::TransitionPolicy;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `pretty` or `json`, got `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub token_ttl_hours: i64,
    pub uploads_dir: String,
    pub cors_origin: String,
    pub max_upload_mb: usize,
    pub transition_policy: TransitionPolicy,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            db_max_connections: get_env_parse_or("DB_MAX_CONNECTIONS", 20)?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_issuer: get_env_or("JWT_ISSUER", "recruitment-tracker"),
            jwt_audience: get_env_or("JWT_AUDIENCE", "recruitment-tracker-web"),
            token_ttl_hours: get_env_parse_or("TOKEN_TTL_HOURS", 24)?,
            uploads_dir: get_env_or("UPLOADS_DIR", "./uploads"),
            cors_origin: get_env_or("CORS_ORIGIN", "http://localhost:5173"),
            max_upload_mb: get_env_parse_or("MAX_UPLOAD_MB", 20)?,
            transition_policy: get_env_parse_or("TRANSITION_POLICY", TransitionPolicy::Permissive)?,
            log_format: get_env_parse_or("LOG_FORMAT", LogFormat::Pretty)?,
        })
    }

    /// Settings for tests and local runs backed by the in-memory store.
    pub fn for_memory_store(uploads_dir: impl Into<String>) -> Self {
        Self {
            server_address: "127.0.0.1:0".to_string(),
            database_url: "memory://".to_string(),
            db_max_connections: 1,
            jwt_secret: "test_secret_key".to_string(),
            jwt_issuer: "recruitment-tracker".to_string(),
            jwt_audience: "recruitment-tracker-web".to_string(),
            token_ttl_hours: 24,
            uploads_dir: uploads_dir.into(),
            cors_origin: "http://localhost:5173".to_string(),
            max_upload_mb: 20,
            transition_policy: TransitionPolicy::Permissive,
            log_format: LogFormat::Pretty,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory://")
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
