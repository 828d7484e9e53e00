//! Route guards
//!
//! Guards only decide. Performing the redirect is left to a [`Navigator`],
//! so the same checks run under any router.

use crate::config::AuthConfig;
use crate::session::SessionStore;
use clinic_core::Role;
use tracing::debug;
use url::form_urlencoded;

/// Result of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

impl GuardOutcome {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Perform the redirect, if any, and report whether navigation may proceed
    pub fn enforce(&self, navigator: &dyn Navigator) -> bool {
        match self {
            Self::Allow => true,
            Self::Redirect(target) => {
                navigator.navigate(target);
                false
            }
        }
    }
}

/// Router hook used to carry out redirects
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Login route carrying `url` as the return target
pub fn login_redirect(url: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(AuthConfig::RETURN_URL_PARAM, url)
        .finish();
    format!("{}?{query}", AuthConfig::LOGIN_ROUTE)
}

/// Guard for pages that need a signed-in user
///
/// With a non-empty `required_roles`, the user must hold at least one of them.
pub fn auth_guard(session: &SessionStore, url: &str, required_roles: &[Role]) -> GuardOutcome {
    if !session.is_authenticated() {
        debug!(url, "Unauthenticated navigation, redirecting to login");
        return GuardOutcome::Redirect(login_redirect(url));
    }

    if !required_roles.is_empty() && !session.has_any_role(required_roles) {
        debug!(url, ?required_roles, "Missing role, redirecting home");
        return GuardOutcome::Redirect(AuthConfig::HOME_ROUTE.to_string());
    }

    GuardOutcome::Allow
}

/// Guard for login and registration pages
pub fn guest_guard(session: &SessionStore) -> GuardOutcome {
    if session.is_authenticated() {
        GuardOutcome::Redirect(AuthConfig::HOME_ROUTE.to_string())
    } else {
        GuardOutcome::Allow
    }
}
