//! Employee handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};

use crate::api::middleware::{require_admin, require_elevated, CurrentUser};
use crate::api::AppState;
use crate::domain::{Conflict, EmployeeCreate, EmployeeRead, EmployeeUpdate, Outcome};
use crate::errors::AppResult;

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee_by_id)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

/// List all employees (Admin/HR)
pub async fn get_all_employees(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<EmployeeRead>>> {
    require_elevated(&current)?;

    let employees = state.employee_service.get_all_employees().await?;
    Ok(Json(employees))
}

/// Get an employee by id (self-service for non-elevated principals)
pub async fn get_employee_by_id(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let ctx = current.context();
    let outcome = state.employee_service.get_employee_by_id(id, &ctx).await?;

    Ok(match outcome {
        Outcome::Ok(employee) => Json(employee).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            format!("Employee with id {id} not found."),
        )
            .into_response(),
    })
}

/// Create an employee (Admin/HR)
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Response> {
    require_elevated(&current)?;
    tracing::info!(
        first_name = %payload.first_name,
        last_name = %payload.last_name,
        "Creating employee"
    );

    let outcome = state.employee_service.create_employee(payload).await?;

    Ok(match outcome {
        Outcome::Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Outcome::Conflict(Conflict::RoleNotFound) => {
            (StatusCode::BAD_REQUEST, "Invalid role ID".to_string()).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    })
}

/// Patch an employee (self-service for non-elevated principals)
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Response> {
    let ctx = current.context();
    let patch_role_id = payload.role_id;
    let outcome = state
        .employee_service
        .update_employee(id, payload, &ctx)
        .await?;

    Ok(match outcome {
        Outcome::Ok(employee) => Json(employee).into_response(),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            format!("Employee with id {id} not found."),
        )
            .into_response(),
        Outcome::Conflict(Conflict::RoleNotFound) => {
            // Only reachable when the patch supplied a role id
            let role_id = patch_role_id.unwrap_or_default();
            (
                StatusCode::NOT_FOUND,
                format!("Role with id {role_id} doesn't exist."),
            )
                .into_response()
        }
        Outcome::Conflict(_) => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    })
}

/// Delete an employee (Admin)
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_admin(&current)?;

    let outcome = state.employee_service.delete_employee(id).await?;

    Ok(match outcome {
        Outcome::Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            format!("Employee with id {id} not found."),
        )
            .into_response(),
        Outcome::Conflict(Conflict::EmployeeWithUser) => (
            StatusCode::BAD_REQUEST,
            format!("Employee with id {id} linked to a user."),
        )
            .into_response(),
        Outcome::Conflict(_) => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    })
}
