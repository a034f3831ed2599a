//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Entity repositories

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    EmployeeRepository, EmployeeStore, RoleRepository, RoleStore, UserRepository, UserStore,
};

#[cfg(feature = "test-utils")]
pub use repositories::{MockEmployeeRepository, MockRoleRepository, MockUserRepository};
