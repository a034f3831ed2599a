//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User domain entity. Each user is linked to exactly one employee;
/// at most one user may reference a given employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub employee_id: i32,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub employee_id: i32,
}

/// User update data transfer object.
///
/// A blank password leaves the stored hash unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub employee_id: Option<i32>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRead {
    pub id: i32,
    pub username: String,
    pub employee_id: i32,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            employee_id: user.employee_id,
        }
    }
}
