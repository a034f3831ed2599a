//! Authentication service unit tests.

use std::sync::Arc;

use chrono::NaiveDate;

use ems_api::config::Config;
use ems_api::domain::{Employee, Password, Role, User};
use ems_api::errors::AppError;
use ems_api::infra::{MockEmployeeRepository, MockRoleRepository, MockUserRepository};
use ems_api::services::{AuthService, Authenticator};

fn test_config() -> Config {
    Config::with_secret("test-secret-key-minimum-32-chars!")
}

fn stored_user(password: &str) -> User {
    User {
        id: 7,
        username: "aliceSmith".to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
        employee_id: 1,
    }
}

fn sample_employee(id: i32) -> Employee {
    Employee {
        id,
        first_name: "Alice".to_string(),
        last_name: "Smith".to_string(),
        age: 30,
        phone: "1234567890".to_string(),
        email: "alice@example.com".to_string(),
        position: "Developer".to_string(),
        date_of_hire: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        role_id: 3,
    }
}

#[tokio::test]
async fn test_login_issues_token_with_role_claim() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(stored_user("secret123"))));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));

    let mut roles = MockRoleRepository::new();
    roles.expect_find_by_id().returning(|id| {
        Ok(Some(Role {
            id,
            name: "Engineer".to_string(),
        }))
    });

    let service = Authenticator::new(
        Arc::new(users),
        Arc::new(employees),
        Arc::new(roles),
        test_config(),
    );
    let token = service.login("aliceSmith", "secret123").await.unwrap();

    assert_eq!(token.token_type, "Bearer");

    // The role claim carries the role name reached through the employee
    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, 7);
    assert_eq!(claims.unique_name, "aliceSmith");
    assert_eq!(claims.role, "Engineer");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(stored_user("secret123"))));

    let service = Authenticator::new(
        Arc::new(users),
        Arc::new(MockEmployeeRepository::new()),
        Arc::new(MockRoleRepository::new()),
        test_config(),
    );
    let err = service.login("aliceSmith", "wrong").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_username() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let service = Authenticator::new(
        Arc::new(users),
        Arc::new(MockEmployeeRepository::new()),
        Arc::new(MockRoleRepository::new()),
        test_config(),
    );
    let err = service.login("nobody", "whatever").await.unwrap_err();

    // Indistinguishable from a bad password
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_verify_token_rejects_garbage() {
    let service = Authenticator::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockEmployeeRepository::new()),
        Arc::new(MockRoleRepository::new()),
        test_config(),
    );

    assert!(service.verify_token("not-a-token").is_err());
}
