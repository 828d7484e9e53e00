//! Frontend configuration

/// Authentication routing configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Route unauthenticated callers are sent to
    pub const LOGIN_ROUTE: &'static str = "/auth/login";

    /// Route callers land on when a guard turns them away
    pub const HOME_ROUTE: &'static str = "/";

    /// Query parameter carrying the originally requested URL
    pub const RETURN_URL_PARAM: &'static str = "returnUrl";
}

/// DOM attribute tagging injected assets with their owning layout
pub const LAYOUT_ATTRIBUTE: &str = "data-layout";
