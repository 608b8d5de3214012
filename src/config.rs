use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_NBU_API_URL: &str =
    "https://bank.gov.ua/NBUStatService/v1/statdirectory/exchange?json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub nbu_api_url: String,
    pub bind_address: String,
    pub port: u16,
}

impl Config {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            nbu_api_url: lookup("NBU_API_URL").unwrap_or_else(|| DEFAULT_NBU_API_URL.to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{key} has invalid value {value:?}")),
        None => Ok(default),
    }
}
