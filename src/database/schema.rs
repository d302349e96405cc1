use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT,
    role TEXT NOT NULL DEFAULT 'Operador',
    status TEXT NOT NULL DEFAULT 'Ativo',
    last_login TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_LOGS: &str = "CREATE TABLE IF NOT EXISTS logs (
    id SERIAL PRIMARY KEY,
    date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    agent TEXT NOT NULL,
    client TEXT NOT NULL,
    type TEXT NOT NULL,
    status TEXT NOT NULL,
    protocol TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_LOGS_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS logs_created_at_idx ON logs (created_at DESC)";

const CREATE_SETTINGS: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

pub const TABLES: [&str; 3] = ["users", "logs", "settings"];

/// Creates every table the console needs. Safe to run repeatedly.
pub async fn ensure_schema() -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool()?;

    for statement in [CREATE_USERS, CREATE_LOGS, CREATE_LOGS_DATE_INDEX, CREATE_SETTINGS] {
        sqlx::query(statement).execute(&pool).await?;
    }

    info!("Schema ready: {}", TABLES.join(", "));
    Ok(())
}
