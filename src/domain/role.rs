//! Role domain entity and related types.

use serde::{Deserialize, Serialize};

/// Role domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

/// Role creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct RoleCreate {
    pub name: String,
}

/// Role update data transfer object.
///
/// `name: None` leaves the name unchanged; `Some("")` is a real rename
/// to the empty string, not a no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
}

/// Role response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRead {
    pub id: i32,
    pub name: String,
}

impl From<Role> for RoleRead {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

impl Role {
    /// Apply a sparse patch; absent fields are untouched.
    pub fn apply(&mut self, patch: RoleUpdate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
