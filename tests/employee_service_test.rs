//! Employee service unit tests.

use std::sync::Arc;

use chrono::NaiveDate;

use ems_api::domain::{
    Conflict, Employee, EmployeeCreate, EmployeeUpdate, Outcome, PrincipalRole, Role,
    SecurityContext, User,
};
use ems_api::errors::AppError;
use ems_api::infra::{MockEmployeeRepository, MockRoleRepository, MockUserRepository};
use ems_api::services::{EmployeeManager, EmployeeService};

fn hire_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
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
        date_of_hire: hire_date(),
        role_id: 3,
    }
}

fn engineer_role() -> Role {
    Role {
        id: 3,
        name: "Engineer".to_string(),
    }
}

fn sample_create() -> EmployeeCreate {
    EmployeeCreate {
        first_name: "Alice".to_string(),
        last_name: "Smith".to_string(),
        age: 30,
        phone: "1234567890".to_string(),
        email: "alice@example.com".to_string(),
        position: "Developer".to_string(),
        date_of_hire: hire_date(),
        role_id: 3,
    }
}

/// Principal with user id 99 linked to employee 1.
fn principal_user() -> User {
    User {
        id: 99,
        username: "aliceSmith".to_string(),
        password_hash: "hashed".to_string(),
        employee_id: 1,
    }
}

fn service(
    employees: MockEmployeeRepository,
    roles: MockRoleRepository,
    users: MockUserRepository,
) -> EmployeeManager {
    EmployeeManager::new(Arc::new(employees), Arc::new(roles), Arc::new(users))
}

// ========== get_all_employees ==========

#[tokio::test]
async fn test_get_all_employees_maps_read_shapes() {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_all().returning(|| {
        let mut other = sample_employee(2);
        other.first_name = "Jane".to_string();
        other.last_name = "Jones".to_string();
        other.role_id = 4;
        Ok(vec![sample_employee(1), other])
    });

    let mut roles = MockRoleRepository::new();
    roles.expect_find_all().returning(|| {
        Ok(vec![
            engineer_role(),
            Role {
                id: 4,
                name: "Manager".to_string(),
            },
        ])
    });

    let service = service(employees, roles, MockUserRepository::new());
    let result = service.get_all_employees().await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(result
        .iter()
        .any(|e| e.full_name == "Alice Smith" && e.role_name.as_deref() == Some("Engineer")));
    assert!(result
        .iter()
        .any(|e| e.full_name == "Jane Jones" && e.role_name.as_deref() == Some("Manager")));
}

#[tokio::test]
async fn test_get_all_employees_empty() {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_all().returning(|| Ok(vec![]));

    let mut roles = MockRoleRepository::new();
    roles.expect_find_all().returning(|| Ok(vec![]));

    let service = service(employees, roles, MockUserRepository::new());
    let result = service.get_all_employees().await.unwrap();

    assert!(result.is_empty());
}

// ========== get_employee_by_id ==========

#[tokio::test]
async fn test_get_employee_by_id_as_admin() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .withf(|id| *id == 2)
        .returning(|id| Ok(Some(sample_employee(id))));

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let service = service(employees, roles, users);
    // Admin may view a record other than their own (employee 1 vs target 2)
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let result = service.get_employee_by_id(2, &ctx).await.unwrap();

    let dto = result.unwrap();
    assert_eq!(dto.full_name, "Alice Smith");
    assert_eq!(dto.role_name.as_deref(), Some("Engineer"));
    assert_eq!(dto.date_of_hire, "2020-01-01");
}

#[tokio::test]
async fn test_get_employee_by_id_own_record() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let service = service(employees, roles, users);
    let ctx = SecurityContext::new(99, PrincipalRole::Employee);
    let result = service.get_employee_by_id(1, &ctx).await.unwrap();

    assert!(matches!(result, Outcome::Ok(_)));
}

#[tokio::test]
async fn test_get_employee_by_id_other_record_is_forbidden() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    // The target must never be fetched for an unauthorized caller
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().times(0);

    let service = service(employees, MockRoleRepository::new(), users);
    let ctx = SecurityContext::new(99, PrincipalRole::Employee);
    let err = service.get_employee_by_id(2, &ctx).await.unwrap_err();

    match err {
        AppError::Forbidden(msg) => assert!(msg.contains("view")),
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_employee_by_id_missing_principal_is_forbidden() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().times(0);

    let service = service(employees, MockRoleRepository::new(), users);
    // Even an elevated role is denied when the principal record is gone
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let err = service.get_employee_by_id(2, &ctx).await.unwrap_err();

    match err {
        AppError::Forbidden(msg) => assert_eq!(msg, "User not found."),
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_employee_by_id_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().returning(|_| Ok(None));

    let service = service(employees, MockRoleRepository::new(), users);
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let result = service.get_employee_by_id(42, &ctx).await.unwrap();

    assert_eq!(result, Outcome::NotFound);
}

// ========== create_employee ==========

#[tokio::test]
async fn test_create_employee_maps_read_shape() {
    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .withf(|id| *id == 3)
        .returning(|_| Ok(Some(engineer_role())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_create()
        .returning(|e| Ok(Employee { id: 1, ..e }));

    let service = service(employees, roles, MockUserRepository::new());
    let result = service.create_employee(sample_create()).await.unwrap();

    let dto = result.unwrap();
    assert_eq!(dto.id, 1);
    assert_eq!(dto.full_name, "Alice Smith");
    assert_eq!(dto.age, 30);
    assert_eq!(dto.phone, "1234567890");
    assert_eq!(dto.date_of_hire, "2020-01-01");
    assert_eq!(dto.role_name.as_deref(), Some("Engineer"));
}

#[tokio::test]
async fn test_create_employee_unknown_role_conflicts() {
    let mut roles = MockRoleRepository::new();
    roles.expect_find_by_id().returning(|_| Ok(None));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(0);

    let service = service(employees, roles, MockUserRepository::new());
    let result = service.create_employee(sample_create()).await.unwrap();

    assert_eq!(result, Outcome::Conflict(Conflict::RoleNotFound));
}

#[tokio::test]
async fn test_create_employee_rejects_age_eighteen() {
    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(0);

    let service = service(employees, roles, MockUserRepository::new());
    let mut input = sample_create();
    input.age = 18;
    let err = service.create_employee(input).await.unwrap_err();

    match err {
        AppError::Validation(msg) => assert!(msg.contains("more than 18")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_employee_accepts_age_nineteen() {
    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_create()
        .returning(|e| Ok(Employee { id: 1, ..e }));

    let service = service(employees, roles, MockUserRepository::new());
    let mut input = sample_create();
    input.age = 19;
    let result = service.create_employee(input).await.unwrap();

    assert_eq!(result.unwrap().age, 19);
}

#[tokio::test]
async fn test_create_employee_role_check_precedes_validation() {
    let mut roles = MockRoleRepository::new();
    roles.expect_find_by_id().returning(|_| Ok(None));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(0);

    let service = service(employees, roles, MockUserRepository::new());
    // Both the role reference and the phone are bad; the role wins
    let mut input = sample_create();
    input.role_id = 77;
    input.phone = "123".to_string();
    let result = service.create_employee(input).await.unwrap();

    assert_eq!(result, Outcome::Conflict(Conflict::RoleNotFound));
}

// ========== update_employee ==========

#[tokio::test]
async fn test_update_employee_merges_sparse_patch() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));
    employees
        .expect_update()
        .withf(|e| {
            e.position == "Lead Developer" && e.first_name == "Alice" && e.age == 30
        })
        .returning(|e| Ok(e));

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let service = service(employees, roles, users);
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let patch = EmployeeUpdate {
        position: Some("Lead Developer".to_string()),
        ..Default::default()
    };
    let result = service.update_employee(1, patch, &ctx).await.unwrap();

    assert_eq!(result.unwrap().position, "Lead Developer");
}

#[tokio::test]
async fn test_update_employee_all_absent_patch_is_idempotent() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));
    employees
        .expect_update()
        .withf(|e| *e == sample_employee(1))
        .returning(|e| Ok(e));

    let mut roles = MockRoleRepository::new();
    roles
        .expect_find_by_id()
        .returning(|_| Ok(Some(engineer_role())));

    let service = service(employees, roles, users);
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let result = service
        .update_employee(1, EmployeeUpdate::default(), &ctx)
        .await
        .unwrap();

    let dto = result.unwrap();
    assert_eq!(dto.full_name, "Alice Smith");
    assert_eq!(dto.age, 30);
    assert_eq!(dto.date_of_hire, "2020-01-01");
}

#[tokio::test]
async fn test_update_employee_age_bounds() {
    for (age, valid) in [(17, false), (18, true), (65, true), (66, false)] {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(principal_user())));

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_employee(id))));
        if valid {
            employees.expect_update().returning(|e| Ok(e));
        } else {
            employees.expect_update().times(0);
        }

        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(|_| Ok(Some(engineer_role())));

        let service = service(employees, roles, users);
        let ctx = SecurityContext::new(99, PrincipalRole::Admin);
        let patch = EmployeeUpdate {
            age: Some(age),
            ..Default::default()
        };
        let result = service.update_employee(1, patch, &ctx).await;

        if valid {
            assert_eq!(result.unwrap().unwrap().age, age, "age {age} should pass");
        } else {
            match result.unwrap_err() {
                AppError::Validation(msg) => assert!(msg.contains("between 18 and 65")),
                other => panic!("expected Validation for age {age}, got {other:?}"),
            }
        }
    }
}

#[tokio::test]
async fn test_update_employee_unknown_role_conflicts_before_validation() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));
    employees.expect_update().times(0);

    let mut roles = MockRoleRepository::new();
    roles.expect_find_by_id().returning(|_| Ok(None));

    let service = service(employees, roles, users);
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    // Bad role reference and bad age together: the role conflict is
    // reported first
    let patch = EmployeeUpdate {
        role_id: Some(77),
        age: Some(17),
        ..Default::default()
    };
    let result = service.update_employee(1, patch, &ctx).await.unwrap();

    assert_eq!(result, Outcome::Conflict(Conflict::RoleNotFound));
}

#[tokio::test]
async fn test_update_employee_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().returning(|_| Ok(None));

    let service = service(employees, MockRoleRepository::new(), users);
    let ctx = SecurityContext::new(99, PrincipalRole::Admin);
    let result = service
        .update_employee(42, EmployeeUpdate::default(), &ctx)
        .await
        .unwrap();

    assert_eq!(result, Outcome::NotFound);
}

#[tokio::test]
async fn test_update_employee_other_record_is_forbidden() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(principal_user())));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().times(0);
    employees.expect_update().times(0);

    let service = service(employees, MockRoleRepository::new(), users);
    let ctx = SecurityContext::new(99, PrincipalRole::Employee);
    let err = service
        .update_employee(2, EmployeeUpdate::default(), &ctx)
        .await
        .unwrap_err();

    match err {
        AppError::Forbidden(msg) => assert!(msg.contains("update")),
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

// ========== delete_employee ==========

#[tokio::test]
async fn test_delete_employee_success() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));
    employees.expect_delete().returning(|_| Ok(()));

    let mut users = MockUserRepository::new();
    users.expect_find_by_employee_id().returning(|_| Ok(None));

    let service = service(employees, MockRoleRepository::new(), users);
    let result = service.delete_employee(1).await.unwrap();

    assert_eq!(result, Outcome::Ok(()));
}

#[tokio::test]
async fn test_delete_employee_not_found() {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().returning(|_| Ok(None));
    employees.expect_delete().times(0);

    let service = service(
        employees,
        MockRoleRepository::new(),
        MockUserRepository::new(),
    );
    let result = service.delete_employee(42).await.unwrap();

    assert_eq!(result, Outcome::NotFound);
}

#[tokio::test]
async fn test_delete_employee_with_linked_user_conflicts() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_employee(id))));
    employees.expect_delete().times(0);

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_employee_id()
        .returning(|_| Ok(Some(principal_user())));

    let service = service(employees, MockRoleRepository::new(), users);
    let result = service.delete_employee(1).await.unwrap();

    assert_eq!(result, Outcome::Conflict(Conflict::EmployeeWithUser));
}
