//! Client library for the Configzio remote configuration service.
//!
//! The client resolves configuration values and reads, writes or deletes
//! per-identity context over HTTPS. Every application lives on its own host,
//! `https://{application}.api.configz.io`, and all resources sit under
//! `/api/v2/`.
//!
//! There is no caching and no retrying: each call is exactly one request, and
//! any failure is returned to the caller as a [`ConfigzioError`].
//!
//! # Authentication
//!
//! A [`TokenProvider`] is asked for a token before every request. When it
//! returns a non-empty token the request carries `Authorization: Bearer
//! <token>`; otherwise it is sent without credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use configzio::{ConfigzioClient, Context};
//! use configzio::auth::token_fn;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConfigzioClient::new(
//!         "acme",
//!         Some(Arc::new(token_fn(|| async { std::env::var("CONFIGZIO_TOKEN").ok() }))),
//!     )?;
//!
//!     let max_users: u32 = client.get_value("limits/maxUsers", None).await?;
//!     println!("max users: {}", max_users);
//!
//!     let context = client.get_context("user", "42").await?;
//!     println!("plan: {:?}", context.get("plan"));
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use auth::{EnvToken, StaticToken, TokenProvider};
pub use client::ConfigzioClient;
pub use config::ConfigzioConfig;
pub use error::{ConfigzioError, Result};
pub use types::{Context, Identities, Identity};
