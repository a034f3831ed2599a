//! HTTP request handlers.

pub mod auth_handler;
pub mod employee_handler;
pub mod role_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use employee_handler::employee_routes;
pub use role_handler::role_routes;
pub use user_handler::user_routes;
