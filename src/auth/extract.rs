//! Locating the token on a request.
//!
//! Accepted value syntax: `Token <credential>`, exactly two
//! whitespace-separated parts, scheme compared case-sensitively. Anything
//! else is a non-match, never an error.

use axum::http::header;
use axum::http::request::Parts;

use crate::auth::config::TokenSource;

pub const AUTH_SCHEME: &str = "Token";

/// Query parameter carrying the token when [`TokenSource::Query`] is used.
/// Matched ignoring ASCII case.
pub const AUTH_QUERY_PARAM: &str = "Authorization";

/// Returns the credential found at `source`, if any.
pub fn locate_token(parts: &Parts, source: TokenSource) -> Option<String> {
    let value = match source {
        TokenSource::Header => header_value(parts)?,
        TokenSource::Query => query_value(parts)?,
    };

    parse_credential(&value).map(str::to_owned)
}

fn header_value(parts: &Parts) -> Option<String> {
    // Only the first header counts; non visible-ASCII values are ignored
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn query_value(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key.eq_ignore_ascii_case(AUTH_QUERY_PARAM))
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Splits `Token <credential>` and returns the credential.
pub fn parse_credential(value: &str) -> Option<&str> {
    let mut parts = value.split(char::is_whitespace);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(AUTH_SCHEME), Some(credential), None) if !credential.is_empty() => Some(credential),
        _ => None,
    }
}
