//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://alijahon.db?mode=rwc`)
//! - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8000)
//! - `STATIC_DIR` - directory served under `/static` (default: static)
//! - `MEDIA_DIR` - directory served under `/media` (default: media)
//! - `SESSION_SECURE_COOKIE` - mark the session cookie `Secure` (default: false)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: String,
    pub media_dir: String,
    pub secure_cookie: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: get("DATABASE_URL", "sqlite://alijahon.db?mode=rwc"),
            database_max_connections: parse("DATABASE_MAX_CONNECTIONS", &get("DATABASE_MAX_CONNECTIONS", "5"))?,
            host: parse("HOST", &get("HOST", "0.0.0.0"))?,
            port: parse("PORT", &get("PORT", "8000"))?,
            static_dir: get("STATIC_DIR", "static"),
            media_dir: get("MEDIA_DIR", "media"),
            secure_cookie: parse("SESSION_SECURE_COOKIE", &get("SESSION_SECURE_COOKIE", "false"))?,
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar(key.to_string(), raw.to_string()))
}
