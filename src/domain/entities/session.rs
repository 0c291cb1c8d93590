//! Authenticated session identity.

use serde::{Deserialize, Serialize};

use super::Role;

/// Identity carried by a verified session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// Unix timestamp after which the session is no longer accepted.
    pub expires_at: i64,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
