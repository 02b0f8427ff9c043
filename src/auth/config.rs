//! Token authentication configuration.
//!
//! The tokenizer is fixed once the config is built. The token source can be
//! switched at runtime through a shared `Arc<TokenAuthConfig>`; requests
//! already in flight observe either the old or the new source.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::auth::tokenizer::Tokenizer;
use crate::error::AuthError;

/// Where in the request the token is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSource {
    /// `Authorization` header
    #[default]
    Header,
    /// `Authorization` query parameter
    Query,
}

impl TokenSource {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Header => 0,
            Self::Query => 1,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Query,
            _ => Self::Header,
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Query => f.write_str("query"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenSourceError(String);

impl fmt::Display for ParseTokenSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token source '{}' (expected header or query)", self.0)
    }
}

impl std::error::Error for ParseTokenSourceError {}

impl FromStr for TokenSource {
    type Err = ParseTokenSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            _ => Err(ParseTokenSourceError(s.to_string())),
        }
    }
}

/// Configuration shared by every hook registered through [`crate::auth::enable`]
/// and [`crate::auth::enable_for_module`].
pub struct TokenAuthConfig {
    tokenizer: Arc<dyn Tokenizer>,
    token_source: AtomicU8,
}

impl fmt::Debug for TokenAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokenizers may hold key material
        f.debug_struct("TokenAuthConfig")
            .field("token_source", &self.token_source())
            .finish_non_exhaustive()
    }
}

impl TokenAuthConfig {
    /// Header-sourced config for the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_source(tokenizer, TokenSource::default())
    }

    pub fn with_source(tokenizer: Arc<dyn Tokenizer>, token_source: TokenSource) -> Self {
        Self {
            tokenizer,
            token_source: AtomicU8::new(token_source.as_u8()),
        }
    }

    pub fn builder() -> TokenAuthConfigBuilder {
        TokenAuthConfigBuilder::default()
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    pub fn token_source(&self) -> TokenSource {
        TokenSource::from_u8(self.token_source.load(Ordering::Acquire))
    }

    /// Switches the token source for subsequent requests.
    pub fn set_token_source(&self, token_source: TokenSource) {
        self.token_source
            .store(token_source.as_u8(), Ordering::Release);
    }
}

/// Builder for [`TokenAuthConfig`].
///
/// `build()` fails with [`AuthError::InvalidArgument`] when no tokenizer was
/// supplied.
#[derive(Default)]
pub struct TokenAuthConfigBuilder {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    token_source: TokenSource,
}

impl TokenAuthConfigBuilder {
    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn token_source(mut self, token_source: TokenSource) -> Self {
        self.token_source = token_source;
        self
    }

    pub fn build(self) -> Result<TokenAuthConfig, AuthError> {
        let tokenizer = self
            .tokenizer
            .ok_or(AuthError::invalid_argument("tokenizer"))?;

        Ok(TokenAuthConfig::with_source(tokenizer, self.token_source))
    }
}
