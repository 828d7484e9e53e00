//! Client error types

use crate::types::{ApiResponse, ErrorResponse};
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error; no response was received
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The access token was rejected (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The access token could not be renewed
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Forbidden (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server returned another error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// The envelope reported `success: false` on a 2xx response
    #[error("Request rejected ({code}): {message}")]
    Rejected { code: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Fallback display text by status code, used when the backend sent no message
#[must_use]
pub fn fallback_message(status: u16) -> &'static str {
    match status {
        0 => "Unable to connect to the server",
        401 => "Invalid username or password",
        403 => "Your account has been locked",
        404 => "The requested resource was not found",
        500..=599 => "The server encountered an error",
        _ => "Something went wrong, please try again",
    }
}

impl ClientError {
    /// Create error from HTTP status code and the backend's message, if any
    pub fn from_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let status = status.as_u16();
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_message(status).to_string());

        match status {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError { status, message },
        }
    }

    /// Create error from a non-success response body
    pub fn from_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|error| error.message);
        Self::from_status(status, message)
    }

    /// Whether this error means the access token was rejected
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// HTTP status associated with the error, if a response was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::ServerError { status, .. } => Some(*status),
            Self::Rejected { code, .. } => Some(*code),
            Self::RefreshFailed(_) | Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(_) => fallback_message(0).to_string(),
            Self::AuthenticationFailed(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::ServerError { message, .. }
            | Self::Rejected { message, .. } => message.clone(),
            Self::RefreshFailed(_) => "Your session has expired. Please log in again.".to_string(),
            Self::Serialization(_) => "Unexpected response from the server".to_string(),
            Self::Configuration(_) => fallback_message(u16::MAX).to_string(),
        }
    }
}

impl<T> ApiResponse<T> {
    /// Payload of a successful envelope, or [`ClientError::Rejected`]
    ///
    /// An envelope marked successful but carrying no `data` is rejected too.
    pub fn into_result(self) -> Result<T, ClientError> {
        let Self {
            success,
            code,
            message,
            data,
            ..
        } = self;

        match data {
            Some(data) if success => Ok(data),
            _ => Err(ClientError::Rejected {
                code,
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Request failed".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_backend_message_wins() {
        let error = ClientError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"code":400,"message":"Slot already booked"}"#,
        );
        assert!(matches!(error, ClientError::BadRequest(_)));
        assert_eq!(error.user_message(), "Slot already booked");
    }

    #[test]
    fn test_fallback_table() {
        let error = ClientError::from_body(StatusCode::UNAUTHORIZED, "Unauthorized");
        assert!(error.is_auth_expired());
        assert_eq!(error.user_message(), "Invalid username or password");

        let error = ClientError::from_body(StatusCode::FORBIDDEN, "");
        assert_eq!(error.user_message(), "Your account has been locked");

        let error = ClientError::from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error.status(), Some(502));
        assert_eq!(error.user_message(), "The server encountered an error");

        let error = ClientError::from_body(StatusCode::CONFLICT, "{}");
        assert_eq!(error.user_message(), "Something went wrong, please try again");
    }

    #[test]
    fn test_blank_message_uses_fallback() {
        let error = ClientError::from_status(StatusCode::NOT_FOUND, Some("  ".to_string()));
        assert_eq!(error.user_message(), "The requested resource was not found");
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected() {
        let response: ApiResponse<u32> = serde_json::from_str(
            r#"{"success":false,"code":200,"message":"Account not activated","data":7}"#,
        )
        .unwrap();
        let error = response.into_result().unwrap_err();

        assert!(matches!(&error, ClientError::Rejected { code: 200, .. }));
        assert_eq!(error.status(), Some(200));
        assert_eq!(error.user_message(), "Account not activated");
    }

    #[test]
    fn test_envelope_without_data_is_rejected() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success":true,"code":200}"#).unwrap();
        let error = response.into_result().unwrap_err();
        assert_eq!(error.user_message(), "Request failed");

        let response: ApiResponse<u32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), 7);
    }
}
