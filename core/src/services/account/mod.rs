//! Account service module
//!
//! Orchestrates registration, login, logout, token refresh, password
//! change, and profile updates over the user repository, the token
//! service, and the media store.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, ProfileUpdate, Registration};
