//! Payment provider redirect outcomes

use serde::{Deserialize, Serialize};

/// Provider response code for a successful transaction
pub const SUCCESS_CODE: &str = "00";

/// Reason shown for response codes missing from the table
pub const GENERIC_FAILURE_REASON: &str = "Payment failed. Please try again.";

/// Human-readable reason for a provider response code
#[must_use]
pub fn failure_reason(code: &str) -> &'static str {
    match code {
        "07" => "suspected fraudulent transaction",
        "09" => "card or account is not registered for internet banking",
        "10" => "card or account verification failed more than 3 times",
        "11" => "payment window expired",
        "12" => "card or account is locked",
        "13" => "incorrect transaction authentication password",
        "24" => "transaction cancelled",
        "51" => "insufficient account balance",
        "65" => "daily transaction limit exceeded",
        "75" => "payment bank is under maintenance",
        "79" => "too many incorrect password attempts",
        "99" => "unknown error",
        _ => GENERIC_FAILURE_REASON,
    }
}

/// Result of a checkout as reported by the provider redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Failed { code: String, reason: &'static str },
}

impl PaymentOutcome {
    /// Map a provider response code; no code means the page was reached without a payment
    #[must_use]
    pub fn from_response_code(code: Option<&str>) -> Self {
        match code {
            None | Some(SUCCESS_CODE) => Self::Succeeded,
            Some(code) => Self::Failed {
                code: code.to_string(),
                reason: failure_reason(code),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Reason to display, if the payment failed
    #[must_use]
    pub const fn failure_reason(&self) -> Option<&'static str> {
        match self {
            Self::Succeeded => None,
            Self::Failed { reason, .. } => Some(*reason),
        }
    }
}

/// Appointment summary stored across the payment redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAppointment {
    pub appointment_id: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_code() {
        assert!(PaymentOutcome::from_response_code(Some("00")).is_success());
    }

    #[test]
    fn test_direct_access_counts_as_success() {
        assert_eq!(
            PaymentOutcome::from_response_code(None),
            PaymentOutcome::Succeeded
        );
    }

    #[test]
    fn test_cancelled_transaction() {
        let outcome = PaymentOutcome::from_response_code(Some("24"));
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure_reason(), Some("transaction cancelled"));
    }

    #[test]
    fn test_unknown_code_is_generic_failure() {
        let outcome = PaymentOutcome::from_response_code(Some("42"));
        assert_eq!(
            outcome,
            PaymentOutcome::Failed {
                code: "42".to_string(),
                reason: GENERIC_FAILURE_REASON,
            }
        );
    }
}
