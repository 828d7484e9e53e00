//! Wire types for the clinic backend

use clinic_core::models::AppointmentStatus;
use serde::{Deserialize, Serialize};

/// Response envelope used by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Payload of a successful envelope
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Error variant of the envelope; carries no `data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Payload of a token refresh; the backend may rotate the refresh token
/// and may echo the user identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: String,
    pub slot_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Backend reply to a booking; `payment_url` is set when checkout needs a redirect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment_id: String,
    pub doctor_id: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub specialty_name: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    pub appointment_date: String,
    pub start_time: String,
    pub end_time: String,
    pub consultation_fee: f64,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::Credentials;

    #[test]
    fn test_login_envelope() {
        let json = r#"{
            "success": true,
            "code": 200,
            "message": "Login successful",
            "data": {
                "accessToken": "a",
                "refreshToken": "r",
                "userId": "u-1",
                "email": "x@y.z",
                "userRoles": ["PATIENT"]
            },
            "timestamp": "2025-01-01T00:00:00Z"
        }"#;
        let envelope: ApiResponse<Credentials> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("Login successful"));
        assert_eq!(envelope.into_data().unwrap().user_id, "u-1");
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let json = r#"{"success": false, "code": 400, "message": "Username taken"}"#;
        let envelope: ApiResponse<Credentials> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.into_data().is_none());
    }

    #[test]
    fn test_create_appointment_request_skips_missing_fields() {
        let request = CreateAppointmentRequest {
            doctor_id: "d-1".to_string(),
            slot_id: "s-1".to_string(),
            patient_id: Some("p-1".to_string()),
            patient_name: None,
            patient_phone: None,
            patient_email: None,
            notes: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["doctorId"], "d-1");
        assert_eq!(value["patientId"], "p-1");
        assert!(value.get("patientName").is_none());
    }
}
