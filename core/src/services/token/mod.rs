//! Token service module for JWT session credentials
//!
//! This module issues and verifies the two token kinds:
//! - short-lived access tokens, checked purely cryptographically
//! - longer-lived refresh tokens, additionally checked against the
//!   account's stored token by the account service

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use service::TokenService;
