use std::{fmt, str::FromStr};

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env vars: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
    #[error("{var} must be a valid number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("DATABASE_URL is not a valid Postgres connection string: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

// ---------------------------------------------------------------------------
// DatabaseConfig
// ---------------------------------------------------------------------------

/// Where the readings table lives: either a literal connection string or the
/// four `DB_*` parts the device deployment sets.
#[derive(Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        user: String,
        password: String,
        host: String,
        port: u16,
        name: String,
    },
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            Self::Url(url) => {
                PgConnectOptions::from_str(url).map_err(ConfigError::InvalidDatabaseUrl)
            }
            Self::Parts {
                user,
                password,
                host,
                port,
                name,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(name)),
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.debug_tuple("Url").field(&"<redacted>").finish(),
            Self::Parts {
                user,
                host,
                port,
                name,
                ..
            } => f
                .debug_struct("Parts")
                .field("user", user)
                .field("password", &"<redacted>")
                .field("host", host)
                .field("port", port)
                .field("name", name)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as
    /// unset, and every missing required key is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => {
                let keys = ["DB_USER", "DB_PASS", "DB_HOST", "DB_NAME"];
                let missing: Vec<&'static str> =
                    keys.into_iter().filter(|k| get(*k).is_none()).collect();
                if !missing.is_empty() {
                    return Err(ConfigError::MissingVars(missing));
                }
                DatabaseConfig::Parts {
                    user: get("DB_USER").unwrap_or_default(),
                    password: get("DB_PASS").unwrap_or_default(),
                    host: get("DB_HOST").unwrap_or_default(),
                    port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
                    name: get("DB_NAME").unwrap_or_default(),
                }
            }
        };

        Ok(Self {
            database,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 10)?,
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), 5000)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
