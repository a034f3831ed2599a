//! User service - Handles user-related business logic.
//!
//! Enforces the one-to-one employee link and username uniqueness. The
//! service-level checks exist for friendly conflict messages; the unique
//! indexes at the store are the true guard, and constraint violations
//! surfacing from the race window are translated to the same conflicts.

use std::sync::Arc;

use async_trait::async_trait;

use super::access::{AccessAction, AccessGate};
use crate::domain::{
    Conflict, Outcome, Password, SecurityContext, User, UserCreate, UserRead, UserUpdate,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmployeeRepository, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn get_all_users(&self) -> AppResult<Vec<UserRead>>;

    /// Get user by ID; self-service access for non-elevated principals
    async fn get_user_by_id(&self, id: i32, ctx: &SecurityContext)
        -> AppResult<Outcome<UserRead>>;

    /// Create a new user linked to an unlinked, existing employee
    async fn create_user(&self, input: UserCreate) -> AppResult<Outcome<UserRead>>;

    /// Apply a sparse patch to a user
    async fn update_user(
        &self,
        id: i32,
        patch: UserUpdate,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<UserRead>>;

    /// Delete a user
    async fn delete_user(&self, id: i32) -> AppResult<Outcome<()>>;
}

/// Translate a store-level unique constraint violation into the matching
/// business conflict. Returns `None` for any other error.
fn unique_conflict(err: &AppError) -> Option<Conflict> {
    if let AppError::Database(db_err) = err {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = db_err.sql_err() {
            return Some(if msg.contains("username") {
                Conflict::UsernameTaken
            } else {
                Conflict::EmployeeLinkedToAnotherUser
            });
        }
    }
    None
}

/// Concrete implementation of UserService using repositories.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    employees: Arc<dyn EmployeeRepository>,
    gate: AccessGate,
}

impl UserManager {
    /// Create new user service instance with repositories
    pub fn new(users: Arc<dyn UserRepository>, employees: Arc<dyn EmployeeRepository>) -> Self {
        let gate = AccessGate::new(users.clone());
        Self {
            users,
            employees,
            gate,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_all_users(&self) -> AppResult<Vec<UserRead>> {
        let users = self.users.find_all().await?;
        let dtos: Vec<UserRead> = users.into_iter().map(UserRead::from).collect();

        tracing::info!(count = dtos.len(), "Successfully retrieved users");

        Ok(dtos)
    }

    async fn get_user_by_id(
        &self,
        id: i32,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<UserRead>> {
        self.gate.authorize_user(ctx, id, AccessAction::View)?;

        let Some(user) = self.users.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        Ok(Outcome::Ok(UserRead::from(user)))
    }

    async fn create_user(&self, input: UserCreate) -> AppResult<Outcome<UserRead>> {
        if self.users.find_by_username(&input.username).await?.is_some() {
            tracing::warn!(username = %input.username, "Username already exists");
            return Ok(Outcome::Conflict(Conflict::UsernameTaken));
        }

        if self
            .users
            .find_by_employee_id(input.employee_id)
            .await?
            .is_some()
        {
            tracing::warn!(
                employee_id = input.employee_id,
                "Employee is already linked to another user"
            );
            return Ok(Outcome::Conflict(Conflict::EmployeeLinkedToAnotherUser));
        }

        if self.employees.find_by_id(input.employee_id).await?.is_none() {
            tracing::warn!(employee_id = input.employee_id, "Employee not found");
            return Ok(Outcome::Conflict(Conflict::EmployeeNotFound));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = User {
            id: 0,
            username: input.username,
            password_hash,
            employee_id: input.employee_id,
        };

        let created = match self.users.create(user).await {
            Ok(created) => created,
            Err(err) => match unique_conflict(&err) {
                Some(conflict) => return Ok(Outcome::Conflict(conflict)),
                None => return Err(err),
            },
        };
        tracing::info!(id = created.id, "User created");

        Ok(Outcome::Ok(UserRead::from(created)))
    }

    async fn update_user(
        &self,
        id: i32,
        patch: UserUpdate,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<UserRead>> {
        self.gate.authorize_user(ctx, id, AccessAction::Update)?;

        let Some(mut user) = self.users.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        if let Some(employee_id) = patch.employee_id {
            if self.employees.find_by_id(employee_id).await?.is_none() {
                tracing::warn!(employee_id, "Employee not found");
                return Ok(Outcome::Conflict(Conflict::EmployeeNotFound));
            }

            // A user is always "linked to itself"; only a different user
            // holding the target employee is a conflict
            if let Some(linked) = self.users.find_by_employee_id(employee_id).await? {
                if linked.id != user.id {
                    tracing::warn!(
                        employee_id,
                        "Employee is already linked to another user"
                    );
                    return Ok(Outcome::Conflict(Conflict::EmployeeLinkedToAnotherUser));
                }
            }

            user.employee_id = employee_id;
        }

        // A blank password leaves the stored hash unchanged
        if let Some(password) = patch.password.as_deref() {
            if !password.trim().is_empty() {
                user.password_hash = Password::new(password)?.into_string();
            }
        }

        let saved = match self.users.update(user).await {
            Ok(saved) => saved,
            Err(err) => match unique_conflict(&err) {
                Some(conflict) => return Ok(Outcome::Conflict(conflict)),
                None => return Err(err),
            },
        };
        tracing::info!(id, "User updated successfully");

        Ok(Outcome::Ok(UserRead::from(saved)))
    }

    async fn delete_user(&self, id: i32) -> AppResult<Outcome<()>> {
        let Some(user) = self.users.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        self.users.delete(user.id).await?;
        tracing::info!(id, "Deleted user successfully");

        Ok(Outcome::Ok(()))
    }
}
