//! Media host client
//!
//! Uploads avatar and cover-image files to the remote media host over HTTP
//! and returns the hosted URL. Uploads are single-shot: a failure is
//! terminal for the current request and never retried here.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use cs_core::errors::DomainError;
use cs_core::services::media::{MediaAsset, MediaStore, MediaUpload};

use crate::InfrastructureError;

/// Media host configuration
#[derive(Debug, Clone)]
pub struct MediaHostConfig {
    /// Base URL of the media host API
    pub base_url: String,
    /// API key sent as a bearer credential
    pub api_key: String,
    /// Timeout for upload requests in seconds
    pub request_timeout_secs: u64,
}

impl MediaHostConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let base_url = std::env::var("MEDIA_HOST_URL")
            .map_err(|_| InfrastructureError::Config("MEDIA_HOST_URL not set".to_string()))?;
        let api_key = std::env::var("MEDIA_HOST_API_KEY")
            .map_err(|_| InfrastructureError::Config("MEDIA_HOST_API_KEY not set".to_string()))?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(InfrastructureError::Config(
                "MEDIA_HOST_URL must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            request_timeout_secs: std::env::var("MEDIA_HOST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Upload response returned by the media host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP implementation of the media store
pub struct HttpMediaHost {
    client: reqwest::Client,
    config: MediaHostConfig,
}

impl HttpMediaHost {
    /// Create a new media host client
    pub fn new(config: MediaHostConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "media host base URL is empty".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "media host API key is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(base_url = %config.base_url, "media host client initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MediaHostConfig::from_env()?)
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MediaStore for HttpMediaHost {
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, DomainError> {
        let filename = upload.filename.unwrap_or_else(|| "file".to_string());
        let size = upload.bytes.len();

        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(filename.clone());
        if let Some(content_type) = &upload.content_type {
            part = part.mime_str(content_type).map_err(|e| DomainError::Media {
                message: format!("invalid content type: {}", e),
            })?;
        }

        let form = reqwest::multipart::Form::new().part("file", part);

        debug!(%filename, size, "uploading file to media host");

        let response = self
            .client
            .post(self.upload_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "media host request failed");
                DomainError::Media {
                    message: format!("media host request failed: {}", e),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "media host rejected upload");
            return Err(DomainError::Media {
                message: format!("media host returned status {}", status),
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| DomainError::Media {
            message: format!("invalid media host response: {}", e),
        })?;

        debug!(url = %body.url, "file uploaded");

        Ok(MediaAsset { url: body.url })
    }
}
