//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{PrincipalRole, SecurityContext};
use crate::errors::AppError;

/// Authenticated principal extracted from the JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: PrincipalRole,
}

impl CurrentUser {
    /// Build the security context handed into gated service calls.
    pub fn context(&self) -> SecurityContext {
        SecurityContext::new(self.id, self.role)
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        username: claims.unique_name,
        role: PrincipalRole::from(claims.role.as_str()),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error otherwise.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}

/// Require an elevated role (Admin or HR), returns Forbidden error otherwise.
pub fn require_elevated(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_elevated() {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}
