//! In-memory tokenizer for the demo server: fixed token -> user table.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use tower::BoxError;

use crate::auth::{Tokenizer, UserIdentity};
use crate::config::TokenEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUser {
    pub user_name: String,
    pub claims: Vec<String>,
}

impl UserIdentity for StaticUser {
    fn user_name(&self) -> &str {
        &self.user_name
    }

    fn claims(&self) -> &[String] {
        &self.claims
    }
}

pub struct StaticTokenizer {
    users: HashMap<String, Arc<dyn UserIdentity>>,
}

impl std::fmt::Debug for StaticTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the tokens themselves
        f.debug_struct("StaticTokenizer")
            .field("tokens", &self.users.len())
            .finish()
    }
}

impl StaticTokenizer {
    pub fn new(entries: &[TokenEntry]) -> Self {
        let users = entries
            .iter()
            .map(|entry| {
                let user: Arc<dyn UserIdentity> = Arc::new(StaticUser {
                    user_name: entry.user_name.clone(),
                    claims: entry.claims.clone(),
                });
                (entry.token.clone(), user)
            })
            .collect();

        Self { users }
    }
}

#[async_trait]
impl Tokenizer for StaticTokenizer {
    async fn resolve(
        &self,
        token: &str,
        _parts: &Parts,
    ) -> Result<Option<Arc<dyn UserIdentity>>, BoxError> {
        Ok(self.users.get(token).cloned())
    }
}
