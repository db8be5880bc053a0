//! # Infrastructure Layer
//!
//! Concrete implementations of the core's persistence and media-host
//! interfaces:
//! - **Database**: MySQL repository built on SQLx with pooled connections
//! - **Media**: HTTP client for the remote media host

pub mod database;
pub mod media;

pub use database::{DatabasePool, MySqlUserRepository};
pub use media::{HttpMediaHost, MediaHostConfig};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
