//! Employee domain entity, DTOs, and input validation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_EMPLOYEE_AGE, MIN_EMPLOYEE_AGE};
use crate::errors::{AppError, AppResult};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Employee domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub date_of_hire: NaiveDate,
    pub role_id: i32,
}

/// Employee creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub date_of_hire: NaiveDate,
    pub role_id: i32,
}

/// Employee update data transfer object.
///
/// Sparse patch: absent fields are untouched on merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub date_of_hire: Option<NaiveDate>,
    pub role_id: Option<i32>,
}

/// Employee response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRead {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub phone: String,
    pub position: String,
    pub email: String,
    pub date_of_hire: String,
    pub role_name: Option<String>,
}

impl EmployeeRead {
    /// Map an employee plus its resolved role name to the read shape.
    pub fn from_entity(employee: Employee, role_name: Option<String>) -> Self {
        Self {
            id: employee.id,
            full_name: format!("{} {}", employee.first_name, employee.last_name),
            age: employee.age,
            phone: employee.phone,
            position: employee.position,
            email: employee.email,
            date_of_hire: employee.date_of_hire.format("%Y-%m-%d").to_string(),
            role_name,
        }
    }
}

impl Employee {
    /// Build an unsaved employee from validated create input.
    /// The id is assigned by the store on insert.
    pub fn from_create(input: EmployeeCreate) -> Self {
        Self {
            id: 0,
            first_name: input.first_name,
            last_name: input.last_name,
            age: input.age,
            phone: input.phone,
            email: input.email,
            position: input.position,
            date_of_hire: input.date_of_hire,
            role_id: input.role_id,
        }
    }

    /// Apply a sparse patch; absent fields are untouched.
    pub fn apply(&mut self, patch: EmployeeUpdate) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(date_of_hire) = patch.date_of_hire {
            self.date_of_hire = date_of_hire;
        }
        if let Some(role_id) = patch.role_id {
            self.role_id = role_id;
        }
    }
}

/// Validate employee create input. First failing rule short-circuits.
///
/// Note the age bound differs from update: create rejects 18 itself.
pub fn validate_create(input: &EmployeeCreate) -> AppResult<()> {
    if input.age <= MIN_EMPLOYEE_AGE {
        return Err(AppError::validation("Age must be more than 18."));
    }

    if !PHONE_RE.is_match(&input.phone) {
        return Err(AppError::validation("Phone number must be exactly 10 digits."));
    }

    if !EMAIL_RE.is_match(&input.email) {
        return Err(AppError::validation("Invalid email format."));
    }

    Ok(())
}

/// Validate employee update input; only supplied fields are checked.
///
/// Age is bounded inclusively here, unlike create. Phone and email are
/// checked only when supplied and non-empty.
pub fn validate_update(patch: &EmployeeUpdate) -> AppResult<()> {
    if let Some(age) = patch.age {
        if !(MIN_EMPLOYEE_AGE..=MAX_EMPLOYEE_AGE).contains(&age) {
            return Err(AppError::validation("Age must be between 18 and 65."));
        }
    }

    if let Some(phone) = patch.phone.as_deref() {
        if !phone.is_empty() && !PHONE_RE.is_match(phone) {
            return Err(AppError::validation("Phone number must be exactly 10 digits."));
        }
    }

    if let Some(email) = patch.email.as_deref() {
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            return Err(AppError::validation("Invalid email format."));
        }
    }

    Ok(())
}
