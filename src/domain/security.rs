//! Security context passed explicitly into gated service calls.

use serde::{Deserialize, Serialize};

use crate::config::{ROLE_ADMIN, ROLE_HR};

/// Coarse principal role derived from the role name carried in the
/// verified credential. Any name other than "Admin"/"HR" is an ordinary
/// employee for authorization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalRole {
    Admin,
    Hr,
    Employee,
}

impl PrincipalRole {
    /// Elevated roles bypass self-service ownership checks.
    pub fn is_elevated(&self) -> bool {
        matches!(self, PrincipalRole::Admin | PrincipalRole::Hr)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, PrincipalRole::Admin)
    }
}

impl From<&str> for PrincipalRole {
    fn from(name: &str) -> Self {
        match name {
            ROLE_ADMIN => PrincipalRole::Admin,
            ROLE_HR => PrincipalRole::Hr,
            _ => PrincipalRole::Employee,
        }
    }
}

/// Authenticated principal for a single request.
///
/// Built by the transport layer from verified claims; the service layer
/// trusts it without re-verification. `principal_id` is a User id.
#[derive(Debug, Clone, Copy)]
pub struct SecurityContext {
    pub principal_id: i32,
    pub role: PrincipalRole,
}

impl SecurityContext {
    pub fn new(principal_id: i32, role: PrincipalRole) -> Self {
        Self { principal_id, role }
    }
}
