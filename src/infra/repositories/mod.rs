//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod employee_repository;
pub(crate) mod entities;
mod role_repository;
mod user_repository;

pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(feature = "test-utils")]
pub use employee_repository::MockEmployeeRepository;
#[cfg(feature = "test-utils")]
pub use role_repository::MockRoleRepository;
#[cfg(feature = "test-utils")]
pub use user_repository::MockUserRepository;
