//! Media storage seam
//!
//! Avatars and cover images live on a remote media host. The account
//! service only sees this trait; the HTTP client lives in the
//! infrastructure layer.

pub mod mock;

use async_trait::async_trait;

use crate::errors::DomainError;

pub use mock::MockMediaStore;

/// A file received from a client, ready for upload
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Original filename, if the client provided one
    pub filename: Option<String>,
    /// MIME type, if the client provided one
    pub content_type: Option<String>,
}

impl MediaUpload {
    /// Creates an upload from raw bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: None,
            content_type: None,
        }
    }
}

/// A file hosted on the media host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    /// Public URL of the hosted file
    pub url: String,
}

/// Remote media host abstraction
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a file and return its hosted asset
    ///
    /// A failed upload is terminal for the current request; implementations
    /// must not retry.
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, DomainError>;
}
