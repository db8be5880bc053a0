//! HTTP layer for the ClipStream account service.
//!
//! Routes, DTOs, middleware, and the error-translation boundary. Business
//! logic lives in `cs_core`; this crate maps HTTP onto it.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
