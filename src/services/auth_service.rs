//! Authentication service - Credential verification and token issuance.
//!
//! The role claim carries the name of the role reached through the user's
//! employee link; the authorization layer collapses unknown names to the
//! ordinary employee role.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmployeeRepository, RoleRepository, UserRepository};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub unique_name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and return a JWT token
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, role_name: &str, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.jwt_expire_minutes);

    let claims = Claims {
        sub: user.id,
        unique_name: user.username.clone(),
        role: role_name.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expire_minutes * 60,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using repositories.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    employees: Arc<dyn EmployeeRepository>,
    roles: Arc<dyn RoleRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance with repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        employees: Arc<dyn EmployeeRepository>,
        roles: Arc<dyn RoleRepository>,
        config: Config,
    ) -> Self {
        Self {
            users,
            employees,
            roles,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        tracing::info!(username, "Authenticating user");

        let user_result = self.users.find_by_username(username).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist to prevent timing attacks that could enumerate usernames.
        // We use a dummy hash that will always fail verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            tracing::warn!(username, "Authentication failed");
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.as_ref().unwrap();

        // Resolve the role name through the employee link for the role claim
        let employee = self
            .employees
            .find_by_id(user.employee_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Employee {} missing for user {}", user.employee_id, user.id))
            })?;
        let role = self
            .roles
            .find_by_id(employee.role_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Role {} missing for employee {}", employee.role_id, employee.id))
            })?;

        tracing::info!(username, "User authenticated successfully");
        generate_token(user, &role.name, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let config = Config::with_secret("test-secret-key-minimum-32-chars!");
        let user = User {
            id: 7,
            username: "aliceSmith".to_string(),
            password_hash: "irrelevant".to_string(),
            employee_id: 3,
        };

        let token = generate_token(&user, "Engineer", &config).unwrap();
        assert_eq!(token.token_type, "Bearer");

        let claims = verify_token_internal(&token.access_token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.unique_name, "aliceSmith");
        assert_eq!(claims.role, "Engineer");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = Config::with_secret("test-secret-key-minimum-32-chars!");
        let other = Config::with_secret("another-secret-key-minimum-32-ch!");
        let user = User {
            id: 1,
            username: "bob".to_string(),
            password_hash: String::new(),
            employee_id: 1,
        };

        let token = generate_token(&user, "HR", &config).unwrap();
        assert!(verify_token_internal(&token.access_token, &other).is_err());
    }
}
