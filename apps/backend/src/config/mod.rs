//! Process configuration, read once at startup from the environment.
//!
//! Every value goes through a lookup function so parsing is testable without
//! touching the real environment. Invalid values are fatal: `main` exits
//! instead of falling back to a default.

use std::time::Duration;

use db_infra::{DbInfraError, DbSettings};
use thiserror::Error;

use crate::middleware::cors::{parse_allowed_origins, DEFAULT_CORS_ORIGINS};
use crate::middleware::rate_limit::RateLimitConfig;
use crate::state::security_config::SecurityConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Presence of any of these means a database is configured.
const DB_VARS: [&str; 3] = ["DATABASE_URL", "DB_USER", "DB_NAME"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("{name} must be a positive duration such as '30s' or '24h', got '{value}'")]
    InvalidDuration { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("BACKEND_PORT must be a valid port, got '{0}'")]
    InvalidPort(String),
    #[error(transparent)]
    Db(#[from] DbInfraError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
    /// `None` runs the service on in-memory storage.
    pub db: Option<DbSettings>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?;
        let mut security = SecurityConfig::new(secret)?;
        if let Some(raw) = non_empty("JWT_EXPIRATION") {
            let ttl = parse_duration("JWT_EXPIRATION", &raw)?;
            if ttl < Duration::from_secs(1) {
                return Err(ConfigError::InvalidDuration {
                    name: "JWT_EXPIRATION",
                    value: raw,
                });
            }
            security = security.with_token_ttl(ttl);
        }

        let host = non_empty("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("BACKEND_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            burst: match non_empty("RATE_LIMIT_BURST") {
                Some(raw) => parse_positive("RATE_LIMIT_BURST", &raw)?,
                None => defaults.burst,
            },
            refill_every: duration_or(&non_empty, "RATE_LIMIT_REFILL_EVERY", defaults.refill_every)?,
            sweep_every: duration_or(&non_empty, "RATE_LIMIT_SWEEP_EVERY", defaults.sweep_every)?,
            idle_ttl: duration_or(&non_empty, "RATE_LIMIT_IDLE_TTL", defaults.idle_ttl)?,
        };

        let db = if DB_VARS.iter().any(|name| non_empty(name).is_some()) {
            Some(DbSettings::from_lookup(&lookup)?)
        } else {
            None
        };

        let cors_origins = match non_empty("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_allowed_origins(&raw),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            host,
            port,
            security,
            rate_limit,
            db,
            cors_origins,
        })
    }
}

fn parse_duration(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim())
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| ConfigError::InvalidDuration {
            name,
            value: raw.to_string(),
        })
}

fn duration_or<F>(lookup: &F, name: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).map_or(Ok(default), |raw| parse_duration(name, &raw))
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}
