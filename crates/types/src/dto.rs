//! Request and response bodies for the auth and order endpoints.

use crate::models::User;
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/otp/request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtp {
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl RequestOtp {
    /// Creates a login request for an existing user (phone number only).
    pub fn for_phone(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            email: None,
            first_name: None,
            last_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user_exists: bool,
    pub is_active: bool,
    pub has_phone_number: bool,
    pub is_new_user: bool,
}

/// Body for `POST /auth/otp/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub otp: String,
}

/// Tokens plus the user record, returned by OTP verification and token
/// refresh. The token fields are snake_case on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Body for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Body for `POST /auth/logout`. Omitting the refresh token revokes every
/// session for the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Profile fields a user may update via `PATCH /users/me`.
///
/// The profile-completion flow patches name, city, and language plus
/// whichever identifier (email or phone number) the user signed up without.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One slot selection inside an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTimeSlot {
    pub time_slot_id: String,
    /// ISO date, `YYYY-MM-DD`.
    pub slot_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub plan_id: String,
    pub address_id: String,
    pub category_id: String,
    /// Area used for worker assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    /// Legacy slot count; superseded by `time_slots`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<OrderTimeSlot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<CreateOrderMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_otp_camel_case() {
        let req = RequestOtp {
            phone_number: "9876543210".into(),
            email: None,
            first_name: Some("Asha".into()),
            last_name: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("phoneNumber"));
        assert!(json.contains("firstName"));
        assert!(!json.contains("email"));
        assert!(!json.contains("lastName"));
    }

    #[test]
    fn test_refresh_request_wire_field() {
        let req = RefreshTokenRequest {
            refresh_token: "r1".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"refreshToken":"r1"}"#);
    }

    #[test]
    fn test_session_response_snake_case_tokens() {
        let resp: SessionResponse = serde_json::from_str(
            r#"{"access_token": "a1", "refresh_token": "r1", "user": {"id": "u-1"}}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token, "a1");
        assert_eq!(resp.user.id, "u-1");
    }

    #[test]
    fn test_user_update_patches_phone_number() {
        let update = UserUpdate {
            phone_number: Some("9876543210".into()),
            first_name: Some("Asha".into()),
            city: Some("Pune".into()),
            ..UserUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"phoneNumber\":\"9876543210\""));
        assert!(json.contains("firstName"));
        assert!(!json.contains("email"));
        assert!(!json.contains("language"));
    }

    #[test]
    fn test_logout_request_empty_for_all_devices() {
        let json = serde_json::to_string(&LogoutRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_create_order_time_slots() {
        let order = CreateOrder {
            plan_id: "p-1".into(),
            address_id: "ad-1".into(),
            category_id: "c-1".into(),
            area_id: Some("ar-1".into()),
            slots: None,
            time_slots: Some(vec![OrderTimeSlot {
                time_slot_id: "ts-1".into(),
                slot_date: "2026-08-10".into(),
            }]),
            meta: Some(CreateOrderMeta {
                payment_method: Some("upi".into()),
                notes: None,
            }),
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("timeSlots"));
        assert!(json.contains("slotDate"));
        assert!(json.contains("paymentMethod"));
        assert!(!json.contains("\"slots\""));
    }
}
