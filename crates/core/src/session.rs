//! Session identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles the backend assigns to accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Doctor => "DOCTOR",
            Self::Patient => "PATIENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the signed-in user, persisted alongside the tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl UserInfo {
    /// Check whether the snapshot carries the given role
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.user_roles.iter().any(|r| r == role.as_str())
    }

    /// Check whether the snapshot carries at least one of the given roles
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }
}

/// Credentials returned by login, registration and token refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl Credentials {
    /// The user snapshot persisted under the user-info key
    #[must_use]
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            user_roles: self.user_roles.clone(),
        }
    }
}
