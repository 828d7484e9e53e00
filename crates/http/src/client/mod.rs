//! Clinic HTTP client

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod error;
pub mod gate;
pub mod payments;
pub mod profiles;
pub mod request;
pub mod specialties;

pub use gate::{AuthGate, CredentialProvider};
pub use request::ApiRequest;

use clinic_core::config::ApiSettings;
use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("clinic-client/", env!("CARGO_PKG_VERSION"));

/// Clinic API client
///
/// This client never attaches credentials on its own; callers pass the
/// bearer token per request. [`AuthGate`] is the usual entry point.
#[derive(Clone, Debug)]
pub struct ClinicClient {
    client: Client,
    base_url: String,
}

impl ClinicClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ClientError> {
        let mut builder = Self::builder().base_url(settings.base_url.clone());
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }

    /// Create a new client builder
    pub fn builder() -> ClinicClientBuilder {
        ClinicClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, request: &ApiRequest, bearer: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self.client.request(request.method().clone(), url);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        builder
    }

    /// Send a request once and decode the JSON response
    ///
    /// An empty success body decodes as JSON `null`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        debug!(
            method = %request.method(),
            path = request.path(),
            authenticated = bearer.is_some(),
            "Sending request"
        );

        let response = self.build_request(request, bearer).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            if body.is_empty() {
                Ok(serde_json::from_slice(b"null")?)
            } else {
                Ok(serde_json::from_slice(&body)?)
            }
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(path = request.path(), status = status.as_u16(), "Request failed");
            Err(ClientError::from_body(status, &body))
        }
    }
}

/// Builder for ClinicClient
#[derive(Default)]
pub struct ClinicClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClinicClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ClinicClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );

        let client = client_builder.build()?;

        Ok(ClinicClient { client, base_url })
    }
}
