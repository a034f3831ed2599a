//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate the authorization gate, invariant checks,
//! validation and persistence per operation. They depend on repository
//! traits for dependency inversion and hold no state between calls.

mod access;
mod auth_service;
pub mod container;
mod employee_service;
mod role_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Authorization gate
pub use access::{AccessAction, AccessGate};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use role_service::{RoleManager, RoleService};
pub use user_service::{UserManager, UserService};
