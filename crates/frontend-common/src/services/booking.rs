//! Appointment checkout and payment completion

use crate::payment::{BookingResult, PaymentCallback};
use crate::session::SessionStore;
use clinic_core::models::PendingAppointment;
use clinic_core::{CoreError, StorageKeys};
use clinic_http::types::CreateAppointmentRequest;
use clinic_http::{AuthGate, ClientError};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Sign in to book an appointment")]
    NotAuthenticated,

    #[error("Invalid payment URL: {0}")]
    InvalidPaymentUrl(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BookingError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => self.to_string(),
            Self::InvalidPaymentUrl(_) => "The payment link is invalid".to_string(),
            Self::Client(error) => error.user_message(),
            Self::Core(_) => "Something went wrong, please try again".to_string(),
        }
    }
}

/// Where checkout sends the user next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRedirect {
    /// Off to the payment provider
    Payment(Url),
    /// Booked without payment
    Confirmed { appointment_id: String },
}

/// Display details kept across the payment redirect
///
/// Anything left empty is filled from the backend's booking reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSummary {
    pub doctor_name: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
}

#[derive(Clone)]
pub struct BookingService {
    gate: AuthGate,
    session: SessionStore,
}

impl BookingService {
    pub fn new(gate: AuthGate, session: SessionStore) -> Self {
        Self { gate, session }
    }

    /// Book a slot for the signed-in user
    ///
    /// When the backend asks for payment, the summary is stored under
    /// `pendingAppointment` for the result page and the provider URL is
    /// returned.
    pub async fn checkout(
        &self,
        request: &CreateAppointmentRequest,
        summary: BookingSummary,
    ) -> Result<CheckoutRedirect, BookingError> {
        let user = self
            .session
            .current_user()
            .ok_or(BookingError::NotAuthenticated)?;

        let mut request = request.clone();
        request.patient_id.get_or_insert(user.user_id);

        let response = self.gate.create_appointment(&request).await?;
        let Some(payment_url) = response.payment_url.filter(|url| !url.is_empty()) else {
            info!(appointment_id = %response.appointment_id, "Appointment booked");
            return Ok(CheckoutRedirect::Confirmed {
                appointment_id: response.appointment_id,
            });
        };

        let url = parse_payment_url(&payment_url)?;
        let pending = PendingAppointment {
            appointment_id: response.appointment_id,
            doctor_name: summary.doctor_name.or(response.doctor_name),
            appointment_date: summary.appointment_date.or(Some(response.appointment_date)),
            appointment_time: summary.appointment_time.or(Some(response.start_time)),
        };
        self.session
            .vault()
            .write_json(StorageKeys::PENDING_APPOINTMENT, &pending)?;

        info!(appointment_id = %pending.appointment_id, "Redirecting to payment provider");
        Ok(CheckoutRedirect::Payment(url))
    }

    /// Settle the provider redirect
    ///
    /// A successful payment with a transaction reference asks the backend to
    /// sync its status. Sync failures are logged and do not change the result.
    pub async fn complete_payment(&self, callback: PaymentCallback) -> BookingResult {
        let result = callback.resolve(self.session.vault());

        let Some(transaction_ref) = result
            .transaction_ref
            .as_deref()
            .filter(|_| result.is_success())
        else {
            return result;
        };

        if let Err(e) = self.gate.sync_payment_status(transaction_ref).await {
            warn!(transaction_ref, error = %e, "Payment status sync failed");
        }
        result
    }
}

fn parse_payment_url(raw: &str) -> Result<Url, BookingError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        warn!(url = raw, "Rejecting payment URL");
        return Err(BookingError::InvalidPaymentUrl(raw.to_string()));
    }
    Url::parse(raw).map_err(|_| BookingError::InvalidPaymentUrl(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_url_scheme() {
        assert!(parse_payment_url("https://pay.example/vpcpay.html?x=1").is_ok());
        assert!(parse_payment_url("http://pay.example/").is_ok());
        assert!(matches!(
            parse_payment_url("javascript:alert(1)"),
            Err(BookingError::InvalidPaymentUrl(_))
        ));
        assert!(matches!(
            parse_payment_url("/relative/path"),
            Err(BookingError::InvalidPaymentUrl(_))
        ));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            BookingError::NotAuthenticated.user_message(),
            "Sign in to book an appointment"
        );
        assert_eq!(
            BookingError::InvalidPaymentUrl("ftp://x".into()).user_message(),
            "The payment link is invalid"
        );
    }
}
