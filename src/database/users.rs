use chrono::{DateTime, Utc};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{NewUser, User, UserUpdate, STATUS_ACTIVE};

const USER_COLUMNS: &str = "id, name, email, password, role, status, last_login, created_at";

pub async fn list_users() -> Result<Vec<User>, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY name ASC",
        USER_COLUMNS
    ))
    .fetch_all(&pool)
    .await?;

    Ok(users)
}

/// Email lookup is case-insensitive
pub async fn find_user_by_email(email: &str) -> Result<Option<User>, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
        USER_COLUMNS
    ))
    .bind(email.trim())
    .fetch_optional(&pool)
    .await?;

    Ok(user)
}

pub async fn count_users() -> Result<i64, DatabaseError> {
    let pool = DatabaseManager::pool()?;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    Ok(count)
}

/// Inserts a user whose password has already been hashed
pub async fn create_user(new_user: &NewUser, password_hash: &str) -> Result<User, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password, role, status)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(new_user.name.trim())
    .bind(new_user.email.trim())
    .bind(password_hash)
    .bind(new_user.role.as_str())
    .bind(new_user.status.as_deref().unwrap_or(STATUS_ACTIVE))
    .fetch_one(&pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Email already registered"))
}

/// Applies a partial update. `password_hash` replaces the stored hash when present.
pub async fn update_user(
    id: i32,
    update: &UserUpdate,
    password_hash: Option<&str>,
) -> Result<User, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            password = COALESCE($4, password),
            role = COALESCE($5, role),
            status = COALESCE($6, status)
         WHERE id = $1
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(id)
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(str::trim))
    .bind(password_hash)
    .bind(update.role.map(|r| r.as_str()))
    .bind(update.status.as_deref())
    .fetch_optional(&pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Email already registered"))?;

    user.ok_or_else(|| DatabaseError::NotFound(format!("User {} not found", id)))
}

pub async fn delete_user(id: i32) -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("User {} not found", id)));
    }
    Ok(())
}

/// Stamps the login time and returns it
pub async fn touch_last_login(id: i32) -> Result<DateTime<Utc>, DatabaseError> {
    let pool = DatabaseManager::pool()?;
    let stamped: DateTime<Utc> =
        sqlx::query_scalar("UPDATE users SET last_login = NOW() WHERE id = $1 RETURNING last_login")
            .bind(id)
            .fetch_one(&pool)
            .await?;
    Ok(stamped)
}
