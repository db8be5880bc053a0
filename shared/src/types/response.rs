//! API response envelope types

use serde::{Deserialize, Serialize};

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response wrapper
///
/// Every successful endpoint responds with `{ status, data, message }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub status: ResponseStatus,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable outcome message
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiResponse<serde_json::Value> {
    /// Create a successful response with an empty data object
    pub fn empty(message: impl Into<String>) -> Self {
        Self::success(serde_json::json!({}), message)
    }
}
