//! SeaORM entity definitions.

pub mod employee;
pub mod role;
pub mod user;
