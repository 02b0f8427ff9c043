/*
 * Responsibility
 * - Shared handler state for the demo routes
 *   - auth: the same TokenAuthConfig the hooks read, so admin routes can switch its token source
 */
use std::sync::Arc;

use crate::auth::TokenAuthConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenAuthConfig>,
}

impl AppState {
    pub fn new(auth: Arc<TokenAuthConfig>) -> Self {
        Self { auth }
    }
}
