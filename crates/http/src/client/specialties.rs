//! Specialty catalogue

use super::{ApiRequest, AuthGate, ClientError};
use clinic_core::models::Specialty;

impl AuthGate {
    /// Specialties currently offered
    pub async fn active_specialties(&self) -> Result<Vec<Specialty>, ClientError> {
        self.send(ApiRequest::get("/specialties/public/active"))
            .await
    }

    /// A single specialty with its doctors
    pub async fn get_specialty(&self, specialty_id: &str) -> Result<Specialty, ClientError> {
        self.send(ApiRequest::get(format!("/specialties/public/{specialty_id}")))
            .await
    }
}
