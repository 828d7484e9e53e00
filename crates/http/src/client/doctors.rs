//! Doctor directory and slot administration

use super::{ApiRequest, AuthGate, ClientError};
use clinic_core::models::{
    BulkSlotGenerationRequest, BulkSlotGenerationResponse, Doctor, DoctorDetail, Page,
};

impl AuthGate {
    /// List doctors visible to the public, one page at a time
    pub async fn list_doctors(&self, page: u32, size: u32) -> Result<Page<Doctor>, ClientError> {
        let request = ApiRequest::get("/doctors/public")
            .query("page", page)
            .query("size", size);
        self.send(request).await
    }

    /// Doctor profile with available slots
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<DoctorDetail, ClientError> {
        self.send(ApiRequest::get(format!("/doctors/public/{doctor_id}")))
            .await
    }

    /// Generate slots for several doctors over a date range (admin only)
    pub async fn generate_bulk_slots(
        &self,
        request: &BulkSlotGenerationRequest,
    ) -> Result<BulkSlotGenerationResponse, ClientError> {
        let request = ApiRequest::post("/admin/doctors/slots/generate").json(request)?;
        self.send(request).await
    }
}
