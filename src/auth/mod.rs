/*
 * Responsibility
 * - Token authentication: config, token location, tokenizer contract, identity slot, hooks
 * - Public API re-exported here; handlers only need CurrentUser
 */
pub mod config;
pub mod extract;
pub mod hooks;
pub mod identity;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ParseTokenSourceError, TokenAuthConfig, TokenAuthConfigBuilder, TokenSource};
pub use hooks::{RequiresAuthentication, TokenAuthHook, enable, enable_for_module};
pub use identity::{CurrentUser, UserIdentity};
pub use tokenizer::Tokenizer;
