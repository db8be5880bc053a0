//! # ClipStream Core
//!
//! Core business logic and domain layer for the ClipStream account service.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
