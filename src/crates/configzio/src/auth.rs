//! Bearer token providers.
//!
//! The client asks its [`TokenProvider`] for a token before every request
//! and never caches the answer, so providers are free to refresh, rotate or
//! look up credentials however they like.
//!
//! # Example
//!
//! ```rust,ignore
//! use configzio::auth::{token_fn, StaticToken};
//! use std::sync::Arc;
//!
//! let fixed = Arc::new(StaticToken::new("abc123"));
//!
//! let dynamic = Arc::new(token_fn(|| async {
//!     Some(fetch_fresh_token().await)
//! }));
//! ```

use async_trait::async_trait;
use std::future::Future;

/// Produces the bearer credential attached to each request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return the current token, or `None` to send the request unauthenticated.
    ///
    /// An empty string is treated the same as `None`.
    async fn token(&self) -> Option<String>;
}

/// Provider that always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Provider that reads an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvToken {
    async fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// Provider backed by an async closure. See [`token_fn`].
#[derive(Clone)]
pub struct TokenFn<F>(F);

/// Wrap an async closure as a [`TokenProvider`].
pub fn token_fn<F, Fut>(f: F) -> TokenFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Option<String>> + Send,
{
    TokenFn(f)
}

#[async_trait]
impl<F, Fut> TokenProvider for TokenFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Option<String>> + Send,
{
    async fn token(&self) -> Option<String> {
        (self.0)().await
    }
}

/// Authorization header value for a bearer token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
