//! Mock implementation of MediaStore for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::errors::DomainError;

use super::{MediaAsset, MediaStore, MediaUpload};

/// Mock media store for testing
///
/// Returns deterministic URLs and counts uploads; can be switched into a
/// failing mode to exercise error paths.
pub struct MockMediaStore {
    uploads: AtomicUsize,
    failing: AtomicBool,
}

impl MockMediaStore {
    /// Create a new mock media store
    pub fn new() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of uploads performed against this store
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Make every subsequent upload fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, upload: MediaUpload) -> Result<MediaAsset, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Media {
                message: "mock upload failure".to_string(),
            });
        }

        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let name = upload.filename.unwrap_or_else(|| "file".to_string());

        Ok(MediaAsset {
            url: format!("https://media.test/assets/{}-{}", n, name),
        })
    }
}
