//! Appointment booking and lookup

use super::{ApiRequest, AuthGate, ClientError};
use crate::types::{AppointmentResponse, CreateAppointmentRequest};
use clinic_core::models::AppointmentDetail;

impl AuthGate {
    /// Book a slot; the response carries the payment URL when checkout needs one
    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<AppointmentResponse, ClientError> {
        let request = ApiRequest::post("/appointments").json(request)?;
        self.send(request).await
    }

    /// Full appointment record for the invoice view
    pub async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<AppointmentDetail, ClientError> {
        self.send(ApiRequest::get(format!("/appointments/{appointment_id}")))
            .await
    }
}
