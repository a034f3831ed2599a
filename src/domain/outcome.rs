//! Tagged results for expected business outcomes.
//!
//! Not-found targets and named relational conflicts are ordinary return
//! values handled by the immediate caller; only authorization, validation
//! and infrastructure failures are raised as [`crate::errors::AppError`].

use std::fmt;

/// Named business conflicts surfaced by the invariant checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Referenced role does not exist (employee create/update)
    RoleNotFound,
    /// Referenced employee does not exist (user create/update)
    EmployeeNotFound,
    /// Employee still linked to a user (employee delete guard)
    EmployeeWithUser,
    /// Role still referenced by an employee (role delete guard)
    EmployeeWithRole,
    /// Target employee already linked to a different user
    EmployeeLinkedToAnotherUser,
    /// Username already in use
    UsernameTaken,
}

impl Conflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conflict::RoleNotFound => "RoleNotFound",
            Conflict::EmployeeNotFound => "EmployeeNotFound",
            Conflict::EmployeeWithUser => "EmployeeWithUser",
            Conflict::EmployeeWithRole => "EmployeeWithRole",
            Conflict::EmployeeLinkedToAnotherUser => "EmployeeLinkedToAnotherUser",
            Conflict::UsernameTaken => "UsernameTaken",
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a domain service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Operation succeeded with a payload
    Ok(T),
    /// Target entity absent
    NotFound,
    /// A relational invariant rejected the operation
    Conflict(Conflict),
}

impl<T> Outcome<T> {
    /// Map the success payload, preserving non-success arms.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(f(v)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Conflict(c) => Outcome::Conflict(c),
        }
    }

    /// Extract the payload, panicking on non-success arms (test helper).
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::NotFound => panic!("called `Outcome::unwrap()` on a `NotFound` value"),
            Outcome::Conflict(c) => {
                panic!("called `Outcome::unwrap()` on a `Conflict({c})` value")
            }
        }
    }
}
