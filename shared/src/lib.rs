//! Shared utilities and common types for the ClipStream account service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope structures
//! - Validation utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, CookieConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig};
pub use types::{ApiResponse, ResponseStatus};
pub use utils::validation;
