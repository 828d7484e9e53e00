//! Replayable request description

use super::auth::{LOGIN_PATH, REFRESH_PATH, REGISTER_PATH};
use super::error::ClientError;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// A backend request that can be sent more than once
///
/// The body is serialized up front so the auth gate can replay the request
/// after a token refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Login and registration never carry a bearer token
    #[must_use]
    pub fn is_credential_exchange(&self) -> bool {
        self.path.contains(LOGIN_PATH) || self.path.contains(REGISTER_PATH)
    }

    /// A failed refresh must not trigger another refresh
    #[must_use]
    pub fn is_token_refresh(&self) -> bool {
        self.path.contains(REFRESH_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_classification() {
        assert!(ApiRequest::post("/auth/login").is_credential_exchange());
        assert!(ApiRequest::post("/auth/register").is_credential_exchange());
        assert!(!ApiRequest::post("/auth/refresh-token").is_credential_exchange());
        assert!(ApiRequest::post("/auth/refresh-token").is_token_refresh());
        assert!(!ApiRequest::get("/appointments/a-1").is_token_refresh());
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/doctors/public")
            .query("page", 2)
            .query("size", 10)
            .json(&json!({"x": 1}))
            .unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.query_pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
        assert_eq!(request.body(), Some(&json!({"x": 1})));
    }
}
