/*
 * Responsibility
 * - Demo server settings from environment variables (.env supported)
 * - Validation (missing / malformed values fail startup)
 */
use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::TokenSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One `token=user[:claim|claim]` entry of `AUTH_TOKENS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub token: String,
    pub user_name: String,
    pub claims: Vec<String>,
}

impl FromStr for TokenEntry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tokens may carry `=` padding, user names may not
        let (token, rest) = s
            .rsplit_once('=')
            .ok_or(ConfigError::Invalid("AUTH_TOKENS"))?;
        let (user_name, claims) = rest.split_once(':').unwrap_or((rest, ""));

        let token = token.trim();
        let user_name = user_name.trim();
        // Tokens travel as a single whitespace-free credential
        if token.is_empty() || token.contains(char::is_whitespace) || user_name.is_empty() {
            return Err(ConfigError::Invalid("AUTH_TOKENS"));
        }

        Ok(Self {
            token: token.to_string(),
            user_name: user_name.to_string(),
            claims: claims
                .split('|')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

pub fn parse_token_entries(raw: &str) -> Result<Vec<TokenEntry>, ConfigError> {
    let entries = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<TokenEntry>)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    if !entries.iter().all(|entry| seen.insert(entry.token.as_str())) {
        return Err(ConfigError::Invalid("AUTH_TOKENS"));
    }

    Ok(entries)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub token_source: TokenSource,
    pub auth_tokens: Vec<TokenEntry>,

    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let token_source = match std::env::var("TOKEN_SOURCE") {
            Ok(raw) => raw
                .parse::<TokenSource>()
                .map_err(|_| ConfigError::Invalid("TOKEN_SOURCE"))?,
            Err(_) => TokenSource::default(),
        };

        let auth_tokens = std::env::var("AUTH_TOKENS")
            .map_err(|_| ConfigError::Missing("AUTH_TOKENS"))
            .and_then(|raw| parse_token_entries(&raw))?;
        if auth_tokens.is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKENS"));
        }

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let body_limit_bytes = std::env::var("BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            token_source,
            auth_tokens,
            request_timeout,
            body_limit_bytes,
        })
    }
}
