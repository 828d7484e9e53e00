//! User profile endpoints

use super::{ApiRequest, AuthGate, ClientError};
use clinic_core::models::UserProfile;
use serde_json::Value;

impl AuthGate {
    /// Profile of the given user
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ClientError> {
        self.send(ApiRequest::get(format!("/users/{user_id}/profiles/me")))
            .await
    }

    /// Update a subset of profile fields
    pub async fn update_profile(
        &self,
        user_id: &str,
        changes: &Value,
    ) -> Result<UserProfile, ClientError> {
        let request = ApiRequest::put(format!("/users/{user_id}/profiles/me")).json(changes)?;
        self.send(request).await
    }
}
