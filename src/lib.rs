//! EMS API - Employee management behind a role-gated API.
//!
//! The domain service layer carries the decision logic: an authorization
//! gate for self-vs-other access, operation-specific input validation,
//! and cross-entity invariant checks (role existence, the one-to-one
//! employee-user link, deletion guards) ahead of every mutation.
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, DTO shapes, outcomes
//! - **services**: Gate, validation and per-entity orchestration
//! - **infra**: Database, migrations, repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Conflict, Outcome, PrincipalRole, SecurityContext};
pub use errors::{AppError, AppResult};
