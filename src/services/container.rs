//! Service Container - Centralized service access.
//!
//! Wires repositories into service implementations and exposes them
//! behind trait objects for dependency injection.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, EmployeeManager, EmployeeService, RoleManager, RoleService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{EmployeeStore, RoleStore, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get employee service
    fn employees(&self) -> Arc<dyn EmployeeService>;

    /// Get role service
    fn roles(&self) -> Arc<dyn RoleService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    employee_service: Arc<dyn EmployeeService>,
    role_service: Arc<dyn RoleService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        employee_service: Arc<dyn EmployeeService>,
        role_service: Arc<dyn RoleService>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            auth_service,
            employee_service,
            role_service,
            user_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let employees = Arc::new(EmployeeStore::new(db.clone()));
        let roles = Arc::new(RoleStore::new(db.clone()));
        let users = Arc::new(UserStore::new(db));

        let auth_service = Arc::new(Authenticator::new(
            users.clone(),
            employees.clone(),
            roles.clone(),
            config,
        ));
        let employee_service = Arc::new(EmployeeManager::new(
            employees.clone(),
            roles.clone(),
            users.clone(),
        ));
        let role_service = Arc::new(RoleManager::new(roles, employees.clone()));
        let user_service = Arc::new(UserManager::new(users, employees));

        Self {
            auth_service,
            employee_service,
            role_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
