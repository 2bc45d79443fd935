use anyhow::Context;
use serde::Deserialize;
use std::env;
use url::Url;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let server_port = get("SERVER_PORT").unwrap_or_else(|| "3000".into());
        let database_url = match get("DATABASE_URL") {
            Some(url) => Some(url),
            None => compose_database_url(&get)?,
        };
        Ok(Self {
            server_port,
            database_url,
        })
    }

    /// The database URL with any password masked, for logging.
    pub fn redacted_database_url(&self) -> Option<String> {
        self.database_url.as_deref().map(redact)
    }
}

fn compose_database_url(get: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Option<String>> {
    const PARTS: [&str; 5] = ["DB_USERNAME", "DB_PASSWORD", "DB_HOST", "DB_PORT", "DB_NAME"];
    if PARTS.iter().all(|&k| get(k).is_none()) {
        return Ok(None);
    }

    let require = |key: &str| get(key).with_context(|| format!("{key} must be set"));
    let username = require("DB_USERNAME")?;
    let password = require("DB_PASSWORD")?;
    let name = require("DB_NAME")?;
    let host = get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into());
    let port = match get("DB_PORT") {
        Some(p) => p
            .parse::<u16>()
            .with_context(|| format!("DB_PORT is not a valid port: {p}"))?,
        None => DEFAULT_DB_PORT,
    };

    let mut url = Url::parse("postgres://localhost").context("base database url")?;
    url.set_host(Some(&host))
        .with_context(|| format!("DB_HOST is not a valid host: {host}"))?;
    url.set_port(Some(port))
        .map_err(|_| anyhow::anyhow!("cannot set database port"))?;
    url.set_username(&username)
        .map_err(|_| anyhow::anyhow!("cannot set database username"))?;
    url.set_password(Some(&password))
        .map_err(|_| anyhow::anyhow!("cannot set database password"))?;
    url.set_path(&name);
    Ok(Some(url.to_string()))
}

fn redact(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => raw.to_string(),
    }
}
