//! Authorization gate - self-vs-other access decisions.
//!
//! The gate runs before the target record is fetched, so an unauthorized
//! caller cannot learn whether the target exists.

use std::fmt;
use std::sync::Arc;

use crate::domain::SecurityContext;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Operation wording carried into denial messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    View,
    Update,
}

impl AccessAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessAction::View => "view",
            AccessAction::Update => "update",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a principal may act on a target record.
///
/// Elevated roles (Admin, HR) bypass ownership checks; everyone else is
/// limited to the record that represents themself.
pub struct AccessGate {
    users: Arc<dyn UserRepository>,
}

impl AccessGate {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Gate an operation on an employee record.
    ///
    /// The principal id is a user id; the principal's own employee id is
    /// resolved through their user record. A missing principal record is
    /// denied before any ownership comparison, for every role.
    pub async fn authorize_employee(
        &self,
        ctx: &SecurityContext,
        employee_id: i32,
        action: AccessAction,
    ) -> AppResult<()> {
        tracing::debug!(
            principal_id = ctx.principal_id,
            employee_id,
            "Checking permissions on employee record"
        );

        let principal = self
            .users
            .find_by_id(ctx.principal_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(principal_id = ctx.principal_id, "Principal user not found");
                AppError::forbidden("User not found.")
            })?;

        if !ctx.role.is_elevated() && principal.employee_id != employee_id {
            tracing::warn!(
                principal_id = ctx.principal_id,
                employee_id,
                action = %action,
                "Unauthorized attempt to access employee data"
            );
            return Err(AppError::forbidden(format!(
                "You are not authorized to {action} this employee's data."
            )));
        }

        Ok(())
    }

    /// Gate an operation on a user record.
    ///
    /// The principal id is itself a user id, so ownership is a direct
    /// comparison with no repository indirection.
    pub fn authorize_user(
        &self,
        ctx: &SecurityContext,
        user_id: i32,
        action: AccessAction,
    ) -> AppResult<()> {
        if !ctx.role.is_elevated() && ctx.principal_id != user_id {
            tracing::warn!(
                principal_id = ctx.principal_id,
                user_id,
                action = %action,
                "Unauthorized attempt to access user data"
            );
            return Err(AppError::forbidden(format!(
                "You are not authorized to {action} this user's data."
            )));
        }

        Ok(())
    }
}
