//! Role service - Handles role-related business logic.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Conflict, Outcome, Role, RoleCreate, RoleRead, RoleUpdate};
use crate::errors::AppResult;
use crate::infra::{EmployeeRepository, RoleRepository};

/// Role service trait for dependency injection.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// List all roles
    async fn get_all_roles(&self) -> AppResult<Vec<RoleRead>>;

    /// Get role by ID
    async fn get_role_by_id(&self, id: i32) -> AppResult<Outcome<RoleRead>>;

    /// Create a new role; the name is required but not shape-checked
    async fn create_role(&self, input: RoleCreate) -> AppResult<RoleRead>;

    /// Rename a role; an absent name leaves it unchanged
    async fn update_role(&self, id: i32, patch: RoleUpdate) -> AppResult<Outcome<RoleRead>>;

    /// Delete a role; blocked while any employee references it
    async fn delete_role(&self, id: i32) -> AppResult<Outcome<()>>;
}

/// Concrete implementation of RoleService using repositories.
pub struct RoleManager {
    roles: Arc<dyn RoleRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl RoleManager {
    /// Create new role service instance with repositories
    pub fn new(roles: Arc<dyn RoleRepository>, employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { roles, employees }
    }
}

#[async_trait]
impl RoleService for RoleManager {
    async fn get_all_roles(&self) -> AppResult<Vec<RoleRead>> {
        let roles = self.roles.find_all().await?;
        let dtos: Vec<RoleRead> = roles.into_iter().map(RoleRead::from).collect();

        tracing::info!(count = dtos.len(), "Successfully fetched roles");

        Ok(dtos)
    }

    async fn get_role_by_id(&self, id: i32) -> AppResult<Outcome<RoleRead>> {
        let Some(role) = self.roles.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        Ok(Outcome::Ok(RoleRead::from(role)))
    }

    async fn create_role(&self, input: RoleCreate) -> AppResult<RoleRead> {
        let created = self
            .roles
            .create(Role {
                id: 0,
                name: input.name,
            })
            .await?;
        tracing::info!(id = created.id, "Created role");

        Ok(RoleRead::from(created))
    }

    async fn update_role(&self, id: i32, patch: RoleUpdate) -> AppResult<Outcome<RoleRead>> {
        let Some(mut role) = self.roles.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        role.apply(patch);
        let saved = self.roles.update(role).await?;
        tracing::info!(id, "Updated role");

        Ok(Outcome::Ok(RoleRead::from(saved)))
    }

    async fn delete_role(&self, id: i32) -> AppResult<Outcome<()>> {
        let Some(role) = self.roles.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        // Deletion guard: referencing employees must be retargeted first
        if !self.employees.find_by_role_id(role.id).await?.is_empty() {
            return Ok(Outcome::Conflict(Conflict::EmployeeWithRole));
        }

        self.roles.delete(role.id).await?;
        tracing::info!(id, "Deleted role");

        Ok(Outcome::Ok(()))
    }
}
