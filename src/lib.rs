//! Token authentication for axum applications.
//!
//! On every request the token hook looks for `Token <credential>` in the
//! `Authorization` header (or the `Authorization` query parameter), hands
//! the credential to a [`auth::Tokenizer`] and, when an identity comes back,
//! stores it as the request's [`auth::CurrentUser`].
//!
//! ```ignore
//! let config = Arc::new(TokenAuthConfig::new(Arc::new(MyTokenizer)));
//!
//! // Opportunistic: identity attached when present
//! let mut pipelines = Pipelines::new();
//! auth::enable(&mut pipelines, Arc::clone(&config))?;
//!
//! // Mandatory for one group of routes
//! let mut account = Module::new(account_routes());
//! auth::enable_for_module(&mut account, Arc::clone(&config))?;
//!
//! let app = pipeline::apply(
//!     Router::new().nest("/account", account.into_router()),
//!     pipelines,
//! );
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod services;
pub mod state;
