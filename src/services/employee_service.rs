//! Employee service - Handles employee-related business logic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::access::{AccessAction, AccessGate};
use crate::domain::employee::{validate_create, validate_update};
use crate::domain::{
    Conflict, Employee, EmployeeCreate, EmployeeRead, EmployeeUpdate, Outcome, SecurityContext,
};
use crate::errors::AppResult;
use crate::infra::{EmployeeRepository, RoleRepository, UserRepository};

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// List all employees
    async fn get_all_employees(&self) -> AppResult<Vec<EmployeeRead>>;

    /// Get employee by ID; self-service access for non-elevated principals
    async fn get_employee_by_id(
        &self,
        id: i32,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<EmployeeRead>>;

    /// Create a new employee
    async fn create_employee(&self, input: EmployeeCreate) -> AppResult<Outcome<EmployeeRead>>;

    /// Apply a sparse patch to an employee
    async fn update_employee(
        &self,
        id: i32,
        patch: EmployeeUpdate,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<EmployeeRead>>;

    /// Delete an employee; blocked while a user references it
    async fn delete_employee(&self, id: i32) -> AppResult<Outcome<()>>;
}

/// Concrete implementation of EmployeeService using repositories.
pub struct EmployeeManager {
    employees: Arc<dyn EmployeeRepository>,
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn UserRepository>,
    gate: AccessGate,
}

impl EmployeeManager {
    /// Create new employee service instance with repositories
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        roles: Arc<dyn RoleRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let gate = AccessGate::new(users.clone());
        Self {
            employees,
            roles,
            users,
            gate,
        }
    }

    async fn role_name(&self, role_id: i32) -> AppResult<Option<String>> {
        Ok(self.roles.find_by_id(role_id).await?.map(|r| r.name))
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn get_all_employees(&self) -> AppResult<Vec<EmployeeRead>> {
        let employees = self.employees.find_all().await?;

        // Resolve role names in one pass instead of per-row lookups
        let role_names: HashMap<i32, String> = self
            .roles
            .find_all()
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();

        let dtos: Vec<EmployeeRead> = employees
            .into_iter()
            .map(|e| {
                let role_name = role_names.get(&e.role_id).cloned();
                EmployeeRead::from_entity(e, role_name)
            })
            .collect();

        tracing::info!(count = dtos.len(), "Successfully retrieved employees");

        Ok(dtos)
    }

    async fn get_employee_by_id(
        &self,
        id: i32,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<EmployeeRead>> {
        self.gate
            .authorize_employee(ctx, id, AccessAction::View)
            .await?;

        let Some(employee) = self.employees.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        let role_name = self.role_name(employee.role_id).await?;
        Ok(Outcome::Ok(EmployeeRead::from_entity(employee, role_name)))
    }

    async fn create_employee(&self, input: EmployeeCreate) -> AppResult<Outcome<EmployeeRead>> {
        // Role existence is reported before any field validation
        let Some(role) = self.roles.find_by_id(input.role_id).await? else {
            return Ok(Outcome::Conflict(Conflict::RoleNotFound));
        };

        validate_create(&input).map_err(|e| {
            tracing::warn!(error = %e, "Invalid employee input");
            e
        })?;

        let created = self.employees.create(Employee::from_create(input)).await?;
        tracing::info!(id = created.id, "Successfully created employee");

        Ok(Outcome::Ok(EmployeeRead::from_entity(
            created,
            Some(role.name),
        )))
    }

    async fn update_employee(
        &self,
        id: i32,
        patch: EmployeeUpdate,
        ctx: &SecurityContext,
    ) -> AppResult<Outcome<EmployeeRead>> {
        self.gate
            .authorize_employee(ctx, id, AccessAction::Update)
            .await?;

        let Some(mut employee) = self.employees.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        if let Some(role_id) = patch.role_id {
            if self.roles.find_by_id(role_id).await?.is_none() {
                return Ok(Outcome::Conflict(Conflict::RoleNotFound));
            }
        }

        validate_update(&patch).map_err(|e| {
            tracing::warn!(error = %e, "Invalid employee input");
            e
        })?;

        employee.apply(patch);
        let saved = self.employees.update(employee).await?;
        tracing::info!(id, "Successfully updated employee");

        let role_name = self.role_name(saved.role_id).await?;
        Ok(Outcome::Ok(EmployeeRead::from_entity(saved, role_name)))
    }

    async fn delete_employee(&self, id: i32) -> AppResult<Outcome<()>> {
        let Some(employee) = self.employees.find_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        // Deletion guard: the linked user must be removed or retargeted first
        if self.users.find_by_employee_id(employee.id).await?.is_some() {
            return Ok(Outcome::Conflict(Conflict::EmployeeWithUser));
        }

        self.employees.delete(employee.id).await?;
        tracing::info!(id = employee.id, "Employee deleted successfully");

        Ok(Outcome::Ok(()))
    }
}
