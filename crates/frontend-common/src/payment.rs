//! Payment provider redirect handling
//!
//! After checkout the provider sends the browser back with its result in the
//! query string. The appointment summary either rides along in the same
//! query or was stashed in storage before the redirect.

use clinic_core::models::{PaymentOutcome, PendingAppointment};
use clinic_core::{CredentialVault, StorageKeys};
use tracing::{debug, warn};
use url::Url;

const RESPONSE_CODE_PARAM: &str = "vnp_ResponseCode";
const TRANSACTION_REF_PARAM: &str = "vnp_TxnRef";

// Base for resolving router-relative callback paths
const PLACEHOLDER_ORIGIN: &str = "http://localhost";

/// Query parameters of the redirect back from the payment provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentCallback {
    pub response_code: Option<String>,
    pub transaction_ref: Option<String>,
    pub appointment: Option<PendingAppointment>,
}

impl PaymentCallback {
    pub fn from_url(url: &Url) -> Self {
        let mut callback = Self::default();
        let mut appointment_id = None;
        let mut doctor_name = None;
        let mut appointment_date = None;
        let mut appointment_time = None;

        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            let value = value.into_owned();
            match key.as_ref() {
                RESPONSE_CODE_PARAM => callback.response_code = Some(value),
                TRANSACTION_REF_PARAM => callback.transaction_ref = Some(value),
                "appointmentId" => appointment_id = Some(value),
                "doctorName" => doctor_name = Some(value),
                "date" => appointment_date = Some(value),
                "time" => appointment_time = Some(value),
                _ => {}
            }
        }

        callback.appointment = appointment_id.map(|appointment_id| PendingAppointment {
            appointment_id,
            doctor_name,
            appointment_date,
            appointment_time,
        });
        callback
    }

    /// Parse an absolute URL or a router path such as `/booking-success?...`
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(PLACEHOLDER_ORIGIN)?;
        Ok(Self::from_url(&base.join(url)?))
    }

    pub fn outcome(&self) -> PaymentOutcome {
        PaymentOutcome::from_response_code(self.response_code.as_deref())
    }

    /// Work out the result, consuming the stored summary when the query lacks one
    ///
    /// The stored summary is only consulted for a provider redirect, that is
    /// when a response code is present.
    pub fn resolve(self, vault: &CredentialVault) -> BookingResult {
        let outcome = self.outcome();
        let appointment = match self.appointment {
            Some(appointment) => Some(appointment),
            None if self.response_code.is_some() => {
                let stored = vault.take_json::<PendingAppointment>(StorageKeys::PENDING_APPOINTMENT);
                if stored.is_none() {
                    warn!("No pending appointment stored for payment callback");
                }
                stored
            }
            None => None,
        };

        debug!(
            success = outcome.is_success(),
            appointment = ?appointment.as_ref().map(|a| &a.appointment_id),
            "Resolved payment callback"
        );

        BookingResult {
            outcome,
            appointment,
            transaction_ref: self.transaction_ref,
        }
    }
}

/// What the booking-result page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingResult {
    pub outcome: PaymentOutcome,
    pub appointment: Option<PendingAppointment>,
    pub transaction_ref: Option<String>,
}

impl BookingResult {
    pub const fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Route of the invoice page for the booked appointment
    pub fn invoice_route(&self) -> Option<String> {
        self.appointment
            .as_ref()
            .map(|appointment| format!("/invoice/{}", appointment.appointment_id))
    }
}
