//! Configzio API client.
//!
//! Each operation is one independent HTTP exchange against
//! `{origin}/api/v2/{resource}`:
//!
//! | Operation        | Method | Resource                                   |
//! |------------------|--------|--------------------------------------------|
//! | `get_value`      | GET    | `values/{full_key_path}`                   |
//! | `get_context`    | GET    | `context/{identity_type}/{identity_id}`    |
//! | `set_context`    | POST   | `context/{identity_type}/{identity_id}`    |
//! | `delete_context` | DELETE | `context/{identity_type}/{identity_id}/{property}` |
//!
//! Path segments are inserted verbatim; callers pass URL-safe values.
//!
//! # Example
//!
//! ```rust,ignore
//! use configzio::{ConfigzioClient, Context};
//! use configzio::auth::StaticToken;
//! use std::sync::Arc;
//!
//! let client = ConfigzioClient::new("acme", Some(Arc::new(StaticToken::new("abc123"))))?;
//!
//! let max_users: u32 = client.get_value("limits/maxUsers", None).await?;
//!
//! let mut context = Context::new();
//! context.insert("plan".to_string(), "pro".into());
//! client.set_context("user", "42", &context).await?;
//! ```

use crate::auth::{bearer, TokenProvider};
use crate::config::ConfigzioConfig;
use crate::error::{ConfigzioError, Result};
use crate::types::{Context, Identities};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Client for a single Configzio application.
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct ConfigzioClient {
    config: ConfigzioConfig,
    client: Client,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl ConfigzioClient {
    /// Create a client for `application`.
    ///
    /// Fails with [`ConfigzioError::ConfigError`] if the application
    /// identifier is empty or contains anything other than ASCII letters,
    /// digits and hyphens. No request is made.
    pub fn new(
        application: impl Into<String>,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self> {
        Self::from_config(ConfigzioConfig::new(application), token_provider)
    }

    /// Create a client from a full configuration.
    pub fn from_config(
        config: ConfigzioConfig,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(|e| {
            ConfigzioError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            config,
            client,
            token_provider,
        })
    }

    /// Replace the token provider.
    pub fn with_token_provider(mut self, token_provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(token_provider);
        self
    }

    /// Application identifier this client talks to.
    pub fn application(&self) -> &str {
        &self.config.application
    }

    pub fn config(&self) -> &ConfigzioConfig {
        &self.config
    }

    /// Resolve a configuration value and decode it as `T`.
    ///
    /// `identities` is accepted for forward compatibility but is not sent to
    /// the server yet.
    pub async fn get_value<T: DeserializeOwned>(
        &self,
        full_key_path: &str,
        identities: Option<Identities>,
    ) -> Result<T> {
        if let Some(identities) = &identities {
            trace!(
                "Value lookup {} ignores {} identities",
                full_key_path,
                identities.as_slice().len()
            );
        }

        let response = self
            .send(Method::GET, &format!("values/{}", full_key_path), None)
            .await?;

        read_json(response).await
    }

    /// Fetch the context stored for an identity.
    pub async fn get_context(&self, identity_type: &str, identity_id: &str) -> Result<Context> {
        let response = self
            .send(
                Method::GET,
                &format!("context/{}/{}", identity_type, identity_id),
                None,
            )
            .await?;

        read_json(response).await
    }

    /// Store context for an identity.
    pub async fn set_context(
        &self,
        identity_type: &str,
        identity_id: &str,
        context: &Context,
    ) -> Result<()> {
        self.send(
            Method::POST,
            &format!("context/{}/{}", identity_type, identity_id),
            Some(context),
        )
        .await?;

        Ok(())
    }

    /// Remove a single property from an identity's context.
    pub async fn delete_context(
        &self,
        identity_type: &str,
        identity_id: &str,
        property: &str,
    ) -> Result<()> {
        self.send(
            Method::DELETE,
            &format!("context/{}/{}/{}", identity_type, identity_id, property),
            None,
        )
        .await?;

        Ok(())
    }

    /// Ask the provider for a token. Empty tokens count as none.
    async fn current_token(&self) -> Option<String> {
        match &self.token_provider {
            Some(provider) => provider.token().await.filter(|t| !t.is_empty()),
            None => None,
        }
    }

    /// Issue one request and reject any status above 299.
    async fn send(&self, method: Method, resource: &str, body: Option<&Context>) -> Result<Response> {
        let url = self.config.resource_url(resource);
        let token = self.current_token().await;

        debug!(
            "Configzio {} {} (authorized: {})",
            method,
            url,
            token.is_some()
        );

        let mut request = self.client.request(method, &url);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, bearer(&token));
        }

        if let Some(body) = body {
            // Sets Content-Type: application/json.
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        trace!("Configzio {} -> {}", url, status);

        if status > 299 {
            return Err(ConfigzioError::RemoteError { status });
        }

        Ok(response)
    }
}

impl fmt::Debug for ConfigzioClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigzioClient")
            .field("config", &self.config)
            .field("token_provider", &self.token_provider.is_some())
            .finish()
    }
}

/// Decode a response body as JSON, keeping transport and decode failures apart.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
