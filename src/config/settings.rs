//! Process settings read from the environment (after an optional `.env`).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LISTEN_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Full connection URL. When set, the `PG*` parts are ignored.
    pub database_url: Option<String>,
    pub pg_host: String,
    pub pg_port: u16,
    pub pg_user: String,
    pub pg_password: Option<String>,
    pub pg_database: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            pg_host: "localhost".into(),
            pg_port: 5432,
            pg_user: "postgres".into(),
            pg_password: None,
            pg_database: "flavors".into(),
            host: "0.0.0.0".into(),
            port: DEFAULT_LISTEN_PORT,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or empty keys take the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            database_url: get("DATABASE_URL"),
            pg_host: get("PGHOST").unwrap_or(defaults.pg_host),
            pg_port: parse_or("PGPORT", get("PGPORT"), defaults.pg_port)?,
            pg_user: get("PGUSER").unwrap_or(defaults.pg_user),
            pg_password: get("PGPASSWORD"),
            pg_database: get("PGDATABASE").unwrap_or(defaults.pg_database),
            host: get("HOST").unwrap_or(defaults.host),
            port: match get("PORT") {
                Some(v) => parse_or("PORT", Some(v), defaults.port)?,
                None => parse_or("PG_PORT", get("PG_PORT"), defaults.port)?,
            },
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                defaults.acquire_timeout.as_secs(),
            )?),
        })
    }

    /// `host:port` for the HTTP listener; the host may be a name or an address.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()));
        }
        let mut options = PgConnectOptions::new()
            .host(&self.pg_host)
            .port(self.pg_port)
            .username(&self.pg_user)
            .database(&self.pg_database);
        if let Some(password) = &self.pg_password {
            options = options.password(password);
        }
        Ok(options)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
