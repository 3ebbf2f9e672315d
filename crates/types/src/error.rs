//! Error types shared across the dwello workspace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Fallback message when neither the server nor the transport supplies one.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// The normalized error surfaced to every API caller.
///
/// Shape: `{ message, statusCode?, errors? }`. `message` prefers a
/// server-supplied value, falling back to the transport error text, falling
/// back to [`DEFAULT_ERROR_MESSAGE`]. `status_code` is absent for pure
/// transport failures. `errors` carries per-field validation messages when
/// the backend provides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

/// Error body fields the backend may include on a failed response.
///
/// `message` is a plain string or a string array (validation errors come back
/// as arrays); only the first element of an array is surfaced.
#[derive(Debug, Deserialize)]
struct WireErrorBody {
    #[serde(default)]
    message: Option<WireMessage>,
    #[serde(default)]
    errors: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireMessage {
    One(String),
    Many(Vec<String>),
}

impl WireMessage {
    fn into_first(self) -> Option<String> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(v) => v.into_iter().next(),
        }
    }
}

impl ApiError {
    /// Builds the normalized error from an HTTP status and raw response body.
    ///
    /// Deterministic: the same `(status, body)` input always yields a
    /// structurally identical error.
    #[must_use]
    pub fn from_status_body(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<WireErrorBody>(body).ok();
        let (message, errors) = match parsed {
            Some(wire) => (wire.message.and_then(WireMessage::into_first), wire.errors),
            None => (None, None),
        };
        Self {
            message: message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            status_code: Some(status),
            errors,
        }
    }

    /// Builds a normalized transport-level error (no status code).
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            status_code: None,
            errors: None,
        }
    }

    /// Returns `true` if this error carries HTTP 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == Some(401)
    }
}

/// Credential-store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage backend failure.
    #[error("storage error: {0}")]
    Backend(String),

    /// Stored session could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    /// Store failures surface to callers in the normalized shape, with no
    /// status code (they never reached the network).
    fn from(e: StoreError) -> Self {
        Self::transport(e.to_string())
    }
}
