//! Payment status calls made after the provider redirect

use super::{ApiRequest, AuthGate, ClientError};
use serde_json::Value;

impl AuthGate {
    /// Ask the backend to pull the transaction status from the provider
    pub async fn sync_payment_status(&self, transaction_id: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::post("/payments/sync-status")
            .query("transactionId", transaction_id)
            .json(&serde_json::json!({}))?;
        self.send(request).await
    }

    /// Confirm a payment by payment id, transaction id, or both
    pub async fn confirm_payment(
        &self,
        payment_id: Option<&str>,
        transaction_id: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut request = ApiRequest::post("/payments/confirm-payment");
        if let Some(payment_id) = payment_id {
            request = request.query("paymentId", payment_id);
        }
        if let Some(transaction_id) = transaction_id {
            request = request.query("transactionId", transaction_id);
        }
        self.send(request).await
    }
}
