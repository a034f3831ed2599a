//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, EmployeeService, RoleService, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Employee service
    pub employee_service: Arc<dyn EmployeeService>,
    /// Role service
    pub role_service: Arc<dyn RoleService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        use crate::services::ServiceContainer;

        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            employee_service: container.employees(),
            role_service: container.roles(),
            user_service: container.users(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        employee_service: Arc<dyn EmployeeService>,
        role_service: Arc<dyn RoleService>,
        user_service: Arc<dyn UserService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            employee_service,
            role_service,
            user_service,
            database,
        }
    }
}
