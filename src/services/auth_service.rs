use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::auth::{self, AuthError, Claims};
use crate::config;
use crate::database::models::user::{NewUser, Role, User};
use crate::database::users;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub expires_in: u64,
}

/// Unknown email, wrong password and inactive accounts all fail the same way
/// and take the same time: every attempt pays for one bcrypt verification.
#[instrument(name = "login", skip(request), fields(email = %request.email))]
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = users::find_user_by_email(&request.email).await?;

    let stored_hash = user.as_ref().and_then(|u| u.password.as_deref());
    let password_ok = auth::verify_password_or_placeholder(&request.password, stored_hash);

    let mut user = match user {
        Some(user) if password_ok => user,
        Some(user) => {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => {
            warn!("Login failed: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    if !user.is_active() {
        warn!(user_id = user.id, status = %user.status, "Login failed: inactive user");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = auth::issue_token(&Claims::for_user(&user))?;

    match users::touch_last_login(user.id).await {
        Ok(stamped) => user.last_login = Some(stamped),
        Err(e) => warn!(user_id = user.id, "Could not record last login: {}", e),
    }

    info!(user_id = user.id, role = %user.role, "User authenticated");
    Ok(LoginResponse {
        token,
        user,
        expires_in: config::config().security.jwt_expiry_hours * 3600,
    })
}

/// Hashes and inserts a user after validating the payload
pub async fn register_user(new_user: &NewUser) -> Result<User, ApiError> {
    validate_new_user(new_user)?;
    let hash = auth::hash_password(&new_user.password)?;
    let user = users::create_user(new_user, &hash).await?;
    info!(user_id = user.id, role = %user.role, "User created");
    Ok(user)
}

pub fn validate_new_user(new_user: &NewUser) -> Result<(), ApiError> {
    if new_user.name.trim().is_empty() {
        return Err(ApiError::invalid_field("name", "Name is required"));
    }
    validate_email(&new_user.email).map_err(|e| ApiError::invalid_field("email", e))?;
    auth::validate_password_strength(&new_user.password).map_err(|e| ApiError::invalid_field("password", e))?;
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    Created,
    UsersExist,
    NotConfigured,
}

/// Seeds the configured administrator when no user exists yet
pub async fn ensure_bootstrap_admin() -> Result<BootstrapOutcome, ApiError> {
    let bootstrap = &config::config().bootstrap;

    let (email, password) = match (&bootstrap.admin_email, &bootstrap.admin_password) {
        (Some(email), Some(password)) => (email.clone(), password.clone()),
        _ => return Ok(BootstrapOutcome::NotConfigured),
    };

    if users::count_users().await? > 0 {
        return Ok(BootstrapOutcome::UsersExist);
    }

    let admin = NewUser {
        name: bootstrap.admin_name.clone(),
        email,
        password,
        role: Role::Administrador,
        status: None,
    };
    register_user(&admin).await?;
    info!("Bootstrap administrator created");
    Ok(BootstrapOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("maria@ascel.com").is_ok());
        assert!(validate_email("  ").is_err());
        assert!(validate_email("maria").is_err());
        assert!(validate_email("maria@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn new_user_validation_reports_first_bad_field() {
        let user = NewUser {
            name: "Maria".into(),
            email: "maria@ascel.com".into(),
            password: "123".into(),
            role: Role::Operador,
            status: None,
        };
        match validate_new_user(&user) {
            Err(ApiError::ValidationError { field_errors: Some(fields), .. }) => {
                assert!(fields.contains_key("password"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected_before_lookup() {
        let request = LoginRequest { email: " ".into(), password: "x".into() };
        let err = login(&request).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
