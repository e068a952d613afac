//! HTTP client for the profiling backend.
//!
//! The backend accepts one multipart field named `file` holding a `.csv` or
//! `.parquet` payload and answers with a profile document. This is the only
//! place in the crate that suspends.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::instrument;

use crate::error::{ErrorContext, ProfileError, Result};
use crate::profile::Profile;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/upload/";

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const ENDPOINT_ENV: &str = "PROFILE_LENS_ENDPOINT";

/// Connection settings for [`ProfilerClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the upload endpoint
    pub endpoint: String,
    /// Upper bound for one upload, including profiling time on the server
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl ClientConfig {
    /// Default settings with the endpoint taken from `PROFILE_LENS_ENDPOINT`
    /// when it is set.
    pub fn from_env() -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::default().with_endpoint(endpoint),
            _ => Self::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Uploads datasets to the profiling backend and decodes the answer.
#[derive(Debug, Clone)]
pub struct ProfilerClient {
    config: Arc<ClientConfig>,
    client: Client,
}

impl ProfilerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let url = Url::parse(&config.endpoint).map_err(|e| {
            ProfileError::Configuration(format!("Invalid endpoint '{}': {e}", config.endpoint))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProfileError::Configuration(format!(
                "Endpoint must be an http(s) URL, got '{}'",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProfileError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Reads `path` and uploads it under its own file name.
    pub async fn upload_file(&self, path: &Path) -> Result<Profile> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        self.upload_bytes(file_name, bytes).await
    }

    /// Uploads an in-memory payload as the multipart `file` field.
    #[instrument(skip(self, bytes), fields(endpoint = %self.config.endpoint, size = bytes.len()))]
    pub async fn upload_bytes(&self, file_name: String, bytes: Vec<u8>) -> Result<Profile> {
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProfileError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProfileError::network(e.to_string()))?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            tracing::warn!(status = status.as_u16(), "Profiling backend rejected upload");
            return Err(ProfileError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let profile = Profile::from_slice(&body)?;
        tracing::info!(
            columns = profile.columns.len(),
            rows = profile.row_count(),
            "Upload profiled"
        );
        Ok(profile)
    }
}
