//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};

use crate::api::middleware::{require_admin, require_elevated, CurrentUser};
use crate::api::AppState;
use crate::domain::{Conflict, Outcome, UserCreate, UserRead, UserUpdate};
use crate::errors::AppResult;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route(
            "/:id",
            get(get_user_by_id).patch(update_user).delete(delete_user),
        )
}

fn conflict_response(conflict: Conflict, employee_id: Option<i32>) -> Response {
    match conflict {
        Conflict::UsernameTaken => (
            StatusCode::CONFLICT,
            "A user with this username already exists.".to_string(),
        )
            .into_response(),
        Conflict::EmployeeLinkedToAnotherUser => {
            let employee_id = employee_id.unwrap_or_default();
            (
                StatusCode::CONFLICT,
                format!("Employee with ID {employee_id} is already linked to another user."),
            )
                .into_response()
        }
        Conflict::EmployeeNotFound => {
            let employee_id = employee_id.unwrap_or_default();
            (
                StatusCode::NOT_FOUND,
                format!("Employee with id {employee_id} not found."),
            )
                .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    }
}

/// List all users (Admin/HR)
pub async fn get_all_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserRead>>> {
    require_elevated(&current)?;

    let users = state.user_service.get_all_users().await?;
    Ok(Json(users))
}

/// Get a user by id (self-service for non-elevated principals)
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let ctx = current.context();
    let outcome = state.user_service.get_user_by_id(id, &ctx).await?;

    Ok(match outcome {
        Outcome::Ok(user) => Json(user).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            format!("User with id {id} not found."),
        )
            .into_response(),
    })
}

/// Create a user (Admin/HR)
pub async fn create_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Response> {
    require_elevated(&current)?;
    tracing::info!(username = %payload.username, "Creating user");

    let employee_id = payload.employee_id;
    let outcome = state.user_service.create_user(payload).await?;

    Ok(match outcome {
        Outcome::Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Outcome::Conflict(conflict) => conflict_response(conflict, Some(employee_id)),
        Outcome::NotFound => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    })
}

/// Patch a user (self-service for non-elevated principals)
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Response> {
    let ctx = current.context();
    let patch_employee_id = payload.employee_id;
    let outcome = state.user_service.update_user(id, payload, &ctx).await?;

    Ok(match outcome {
        Outcome::Ok(user) => Json(user).into_response(),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            format!("User with id {id} not found."),
        )
            .into_response(),
        Outcome::Conflict(conflict) => conflict_response(conflict, patch_employee_id),
    })
}

/// Delete a user (Admin)
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_admin(&current)?;

    let outcome = state.user_service.delete_user(id).await?;

    Ok(match outcome {
        Outcome::Ok(()) => StatusCode::NO_CONTENT.into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            format!("User with id {id} not found."),
        )
            .into_response(),
    })
}
