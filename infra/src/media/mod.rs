//! Media host module - remote file hosting over HTTP.

pub mod http_host;

pub use http_host::{HttpMediaHost, MediaHostConfig};
