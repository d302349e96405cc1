use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::auth;
use crate::database::models::{NewUser, User, UserUpdate};
use crate::database::users;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::AuthUser;
use crate::services::auth_service;

/// GET /api/users - All users ordered by name; an empty list if the store is down
pub async fn get() -> Json<Vec<User>> {
    match users::list_users().await {
        Ok(users) => Json(users),
        Err(e) => {
            error!("Failed to load users: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/users - Create a user (administrators only)
pub async fn post(
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    auth_user.require_admin()?;
    let user = auth_service::register_user(&new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/:id - Partial update; a supplied password is rehashed
pub async fn put(
    ApiPath(id): ApiPath<i32>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> ApiResult<Json<User>> {
    auth_user.require_admin()?;

    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::invalid_field("name", "Name cannot be empty"));
        }
    }
    if let Some(email) = &update.email {
        auth_service::validate_email(email).map_err(|e| ApiError::invalid_field("email", e))?;
    }

    let password_hash = match update.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            auth::validate_password_strength(password).map_err(|e| ApiError::invalid_field("password", e))?;
            Some(auth::hash_password(password)?)
        }
        None => None,
    };

    let user = users::update_user(id, &update, password_hash.as_deref()).await?;
    info!(user_id = id, by = auth_user.user_id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn delete(
    ApiPath(id): ApiPath<i32>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<Value>> {
    auth_user.require_admin()?;

    if id == auth_user.user_id {
        return Err(ApiError::bad_request("Cannot delete your own account"));
    }

    users::delete_user(id).await?;
    info!(user_id = id, by = auth_user.user_id, "User deleted");
    Ok(Json(json!({ "message": "User deleted", "id": id })))
}
