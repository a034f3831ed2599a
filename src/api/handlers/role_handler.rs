//! Role handlers. All role operations are Admin-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Conflict, Outcome, RoleCreate, RoleRead, RoleUpdate};
use crate::errors::AppResult;

/// Create role routes
pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_roles).post(create_role))
        .route(
            "/:id",
            get(get_role_by_id).patch(update_role).delete(delete_role),
        )
}

/// List all roles
pub async fn get_all_roles(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<RoleRead>>> {
    require_admin(&current)?;

    let roles = state.role_service.get_all_roles().await?;
    Ok(Json(roles))
}

/// Get a role by id
pub async fn get_role_by_id(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_admin(&current)?;

    let outcome = state.role_service.get_role_by_id(id).await?;

    Ok(match outcome {
        Outcome::Ok(role) => Json(role).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            format!("Role with id {id} not found."),
        )
            .into_response(),
    })
}

/// Create a role
pub async fn create_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<Response> {
    require_admin(&current)?;
    tracing::info!(name = %payload.name, "Creating role");

    let role = state.role_service.create_role(payload).await?;
    Ok((StatusCode::CREATED, Json(role)).into_response())
}

/// Rename a role
pub async fn update_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Response> {
    require_admin(&current)?;

    let outcome = state.role_service.update_role(id, payload).await?;

    Ok(match outcome {
        Outcome::Ok(role) => Json(role).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            format!("Role with id {id} not found."),
        )
            .into_response(),
    })
}

/// Delete a role
pub async fn delete_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_admin(&current)?;

    let outcome = state.role_service.delete_role(id).await?;

    Ok(match outcome {
        Outcome::Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            format!("Role with id {id} not found."),
        )
            .into_response(),
        Outcome::Conflict(Conflict::EmployeeWithRole) => (
            StatusCode::BAD_REQUEST,
            format!("Role with id {id} linked to an employee."),
        )
            .into_response(),
        Outcome::Conflict(_) => (
            StatusCode::BAD_REQUEST,
            "An unknown error occurred.".to_string(),
        )
            .into_response(),
    })
}
