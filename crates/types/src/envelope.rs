//! The `{ success, message, data }` envelope every backend response uses.

use crate::error::{ApiError, DEFAULT_ERROR_MESSAGE};
use serde::{Deserialize, Serialize};

/// Standard response envelope returned by every Dwello endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the envelope into its payload.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] carrying the envelope message when the backend
    /// reports `success: false` or omits `data`.
    pub fn into_data(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(ApiError {
                message: self
                    .message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                status_code: self.status_code,
                errors: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_success() {
        let resp: ApiResponse<u32> = serde_json::from_str(r#"{"success": true, "data": 7}"#)
            .unwrap();
        assert_eq!(resp.into_data().unwrap(), 7);
    }

    #[test]
    fn test_into_data_failure_carries_message() {
        let resp: ApiResponse<u32> =
            serde_json::from_str(r#"{"success": false, "message": "OTP expired"}"#).unwrap();
        let err = resp.into_data().unwrap_err();
        assert_eq!(err.message, "OTP expired");
    }

    #[test]
    fn test_into_data_success_without_payload_is_error() {
        let resp: ApiResponse<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.into_data().is_err());
    }

    #[test]
    fn test_envelope_optional_fields_absent() {
        let resp: ApiResponse<String> =
            serde_json::from_str(r#"{"success": true, "data": "ok"}"#).unwrap();
        assert!(resp.message.is_none());
        assert!(resp.status_code.is_none());
    }
}
