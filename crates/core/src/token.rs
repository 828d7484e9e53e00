//! Access-token claim decoding
//!
//! Only the payload segment is read. Signatures are the backend's concern;
//! the client needs the expiry to schedule a refresh.

use crate::error::{CoreError, CoreResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Claims the client reads from an access token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiry as a Unix timestamp in seconds
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<String>,
}

impl TokenClaims {
    /// Decode the payload of a JWT-shaped token
    pub fn decode(token: &str) -> CoreResult<Self> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => return Err(CoreError::malformed_token("expected three segments")),
        };

        // Some issuers pad the payload even though JWTs should not be padded
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| CoreError::malformed_token(format!("invalid base64 payload: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::malformed_token(format!("invalid claims: {e}")))
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> CoreResult<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
            .ok_or_else(|| CoreError::malformed_token(format!("exp out of range: {}", self.exp)))
    }

    /// Time from `now` until `lead` before expiry, or `None` if that moment has passed
    pub fn refresh_delay(&self, now: DateTime<Utc>, lead: Duration) -> CoreResult<Option<Duration>> {
        let lead = chrono::Duration::from_std(lead)
            .map_err(|e| CoreError::invalid_config(format!("refresh lead out of range: {e}")))?;
        let fire_at = self
            .expires_at()?
            .checked_sub_signed(lead)
            .ok_or_else(|| CoreError::malformed_token(format!("exp too early for refresh lead: {}", self.exp)))?;

        Ok(fire_at.signed_duration_since(now).to_std().ok().filter(|delay| !delay.is_zero()))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::token_with_payload;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = token_with_payload(&json!({"sub": "u-1", "exp": 1_700_000_000}));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.exp, 1_700_000_000);
        assert_eq!(claims.sub.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_refresh_delay() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = token_with_payload(&json!({"exp": 1_700_000_000 + 600}));
        let claims = TokenClaims::decode(&token).unwrap();

        let delay = claims.refresh_delay(now, Duration::from_secs(60)).unwrap();
        assert_eq!(delay, Some(Duration::from_secs(540)));
    }

    #[test]
    fn test_refresh_delay_inside_lead_window() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let token = token_with_payload(&json!({"exp": 1_700_000_000 + 30}));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.refresh_delay(now, Duration::from_secs(60)).unwrap(), None);

        let token = token_with_payload(&json!({"exp": 1_700_000_000 + 60}));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.refresh_delay(now, Duration::from_secs(60)).unwrap(), None);
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(
            TokenClaims::decode("not-a-jwt"),
            Err(CoreError::MalformedToken { .. })
        ));
        assert!(matches!(
            TokenClaims::decode("a.%%%.c"),
            Err(CoreError::MalformedToken { .. })
        ));

        let missing_exp = token_with_payload(&json!({"sub": "u-1"}));
        assert!(matches!(
            TokenClaims::decode(&missing_exp),
            Err(CoreError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_out_of_range_expiry_is_malformed() {
        let token = token_with_payload(&json!({"exp": DateTime::<Utc>::MIN_UTC.timestamp()}));
        let claims = TokenClaims::decode(&token).unwrap();

        assert!(matches!(
            claims.refresh_delay(Utc::now(), Duration::from_secs(60)),
            Err(CoreError::MalformedToken { .. })
        ));
    }
}
