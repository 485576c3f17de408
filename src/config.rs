use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// Full connection URL. When set, the discrete parts below are ignored
    /// except for `charset`, `timezone` and `max_connections`.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub charset: String,
    pub timezone: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_origin: String,
    pub db: DbConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let db = DbConfig {
            url: get("DATABASE_URL").filter(|v| !v.is_empty()),
            host: or("DB_HOST", "localhost"),
            port: parse_or(&get, "DB_PORT", 5432)?,
            username: or("DB_USER", "postgres"),
            password: or("DB_PASSWORD", ""),
            name: or("DB_NAME", "users"),
            charset: utf8_charset(or("DB_CHARSET", "UTF8"))?,
            timezone: or("DB_TIMEZONE", "UTC"),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
        };

        Ok(Self {
            host: or("APP_HOST", "0.0.0.0"),
            port: parse_or(&get, "APP_PORT", 8080)?,
            cors_allow_origin: or("CORS_ALLOW_ORIGIN", "http://localhost:4200"),
            db,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DbConfig {
    /// Connection options for the pool, with the session encoding and
    /// time zone applied on every connection.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let base = match &self.url {
            Some(url) => PgConnectOptions::from_str(url).context("parse DATABASE_URL")?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.username)
                .password(&self.password)
                .database(&self.name),
        };
        Ok(base.options([
            ("client_encoding", self.charset.as_str()),
            ("TimeZone", self.timezone.as_str()),
        ]))
    }
}

/// The driver only decodes UTF-8 text, so any other client encoding would
/// corrupt non-ASCII values. Spellings of UTF-8 are normalised to `UTF8`.
fn utf8_charset(raw: String) -> anyhow::Result<String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "UTF8" | "UTF-8" => Ok("UTF8".to_string()),
        _ => anyhow::bail!("unsupported DB_CHARSET {raw:?}: only UTF8 is supported"),
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
