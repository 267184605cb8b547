//! Quill backend client

pub mod auth;
pub mod error;
pub mod posts;
pub mod profiles;

use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use tracing::debug;

/// Header carrying the project's public (anon) key on every request
pub const API_KEY_HEADER: &str = "apikey";

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("quill-client/", env!("CARGO_PKG_VERSION"));

/// Client for the hosted backend's auth (`/auth/v1`) and data (`/rest/v1`) endpoints
#[derive(Clone)]
pub struct QuillClient {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl QuillClient {
    /// Create a new client with default configuration
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).anon_key(anon_key).build()
    }

    /// Create a new client builder
    pub fn builder() -> QuillClientBuilder {
        QuillClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests are sent on behalf of a signed-in user
    pub const fn has_session(&self) -> bool {
        self.access_token.is_some()
    }

    /// Same client, acting for a different session (or anonymously with `None`)
    #[must_use]
    pub fn with_access_token(&self, access_token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: access_token.filter(|token| !token.is_empty()),
        }
    }

    /// Create a request builder carrying the project key and the best available bearer token
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);

        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Execute a request whose response body is irrelevant
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let url = response.url().path().to_string();
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        debug!(%status, path = %url, "Backend request failed");
        ClientError::from_status(status, message)
    }

    fn require_session(&self) -> Result<(), ClientError> {
        if self.access_token.is_some() {
            Ok(())
        } else {
            Err(ClientError::NoSession)
        }
    }
}

/// Builder for `QuillClient`
#[derive(Default)]
pub struct QuillClientBuilder {
    base_url: Option<String>,
    anon_key: Option<String>,
    access_token: Option<String>,
}

impl QuillClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the project's public key
    #[must_use]
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the access token of the signed-in user
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<QuillClient, ClientError> {
        let base_url = self
            .base_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let anon_key = self
            .anon_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::Configuration("anon_key is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        // The browser owns the user agent on wasm
        #[cfg(target_arch = "wasm32")]
        let client_builder = ClientBuilder::new();
        #[cfg(not(target_arch = "wasm32"))]
        let client_builder = ClientBuilder::new().user_agent(USER_AGENT);

        let client = client_builder.build()?;

        Ok(QuillClient {
            client,
            base_url,
            anon_key,
            access_token: self.access_token.filter(|token| !token.is_empty()),
        })
    }
}
