use std::fmt;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Database engine, derived from the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    Sqlite,
}

/// Connection settings for the application database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub retry_interval: Duration,
}

impl DbSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    /// Private in-memory SQLite database. A single pooled connection keeps
    /// the database alive for the lifetime of the pool.
    pub fn sqlite_memory() -> Self {
        Self {
            max_connections: 1,
            connect_attempts: 1,
            ..Self::new("sqlite::memory:")
        }
    }

    pub fn from_env() -> Result<Self, DbInfraError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`.
    ///
    /// `DATABASE_URL` wins when present. Otherwise a Postgres URL is assembled
    /// from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbInfraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = match non_empty("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = non_empty("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port = non_empty("DB_PORT").unwrap_or_else(|| "5432".to_string());
                port.parse::<u16>().map_err(|_| {
                    DbInfraError::config(format!("DB_PORT must be a valid port, got '{port}'"))
                })?;
                let user = must(&non_empty, "DB_USER")?;
                let password = must(&non_empty, "DB_PASSWORD")?;
                let name = must(&non_empty, "DB_NAME")?;
                let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
                format!("postgresql://{user}:{password}@{host}:{port}/{name}")
            }
        };

        let mut settings = Self::new(url);
        if let Some(raw) = non_empty("DB_MAX_CONNECTIONS") {
            settings.max_connections = raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DbInfraError::config(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                    ))
                })?;
        }

        settings.kind()?;
        Ok(settings)
    }

    pub fn kind(&self) -> Result<DbKind, DbInfraError> {
        if self.url.starts_with("postgres://") || self.url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if self.url.starts_with("sqlite:") {
            Ok(DbKind::Sqlite)
        } else {
            Err(DbInfraError::config(format!(
                "unsupported database URL scheme: '{}'",
                sanitize_db_url(&self.url)
            )))
        }
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("url", &sanitize_db_url(&self.url))
            .field("max_connections", &self.max_connections)
            .field("connect_attempts", &self.connect_attempts)
            .field("retry_interval", &self.retry_interval)
            .finish()
    }
}

fn must<F>(lookup: &F, name: &str) -> Result<String, DbInfraError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}

/// Mask the password in a connection string for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((auth, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
