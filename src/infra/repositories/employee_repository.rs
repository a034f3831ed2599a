//! Employee repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use crate::domain::Employee;
use crate::errors::{AppError, AppResult};

#[cfg(feature = "test-utils")]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// List all employees in storage order
    async fn find_all(&self) -> AppResult<Vec<Employee>>;

    /// Find employee by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// List employees referencing a role (role deletion guard)
    async fn find_by_role_id(&self, role_id: i32) -> AppResult<Vec<Employee>>;

    /// Insert a new employee; the store assigns the identity
    async fn create(&self, employee: Employee) -> AppResult<Employee>;

    /// Persist a mutated employee
    async fn update(&self, employee: Employee) -> AppResult<Employee>;

    /// Delete employee by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EmployeeRepository over SeaORM
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active(employee: Employee, keep_id: bool) -> ActiveModel {
    ActiveModel {
        id: if keep_id { Set(employee.id) } else { NotSet },
        first_name: Set(employee.first_name),
        last_name: Set(employee.last_name),
        age: Set(employee.age),
        phone: Set(employee.phone),
        email: Set(employee.email),
        position: Set(employee.position),
        date_of_hire: Set(employee.date_of_hire),
        role_id: Set(employee.role_id),
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_role_id(&self, role_id: i32) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .filter(employee::Column::RoleId.eq(role_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn create(&self, employee: Employee) -> AppResult<Employee> {
        let model = to_active(employee, false)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Employee::from(model))
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let model = to_active(employee, true)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Employee::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        EmployeeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
