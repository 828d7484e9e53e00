//! Authentication API client methods
//!
//! These go straight through [`ClinicClient`]: login and registration carry
//! no credentials, and a refresh must never be intercepted by the gate.

use super::{ApiRequest, ClientError, ClinicClient};
use crate::types::{
    ApiResponse, LoginRequest, RefreshTokenRequest, RefreshedTokens, RegisterRequest,
};
use clinic_core::Credentials;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const REFRESH_PATH: &str = "/auth/refresh-token";

impl ClinicClient {
    /// Exchange username and password for credentials
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<Credentials>, ClientError> {
        let req = ApiRequest::post(LOGIN_PATH).json(request)?;
        self.execute(&req, None).await
    }

    /// Create an account; the backend signs the new user in
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<Credentials>, ClientError> {
        let req = ApiRequest::post(REGISTER_PATH).json(request)?;
        self.execute(&req, None).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<ApiResponse<RefreshedTokens>, ClientError> {
        let req = ApiRequest::post(REFRESH_PATH).json(&RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        self.execute(&req, None).await
    }
}
