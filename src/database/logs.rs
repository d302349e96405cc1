use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::log::{Log, LogFilter, NewLog};

const LOG_COLUMNS: &str = "id, date, agent, client, type, status, protocol, created_at";

/// Newest first, bounded by the filter's inclusive range and limit
pub async fn list_logs(filter: &LogFilter) -> Result<Vec<Log>, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let logs = sqlx::query_as::<_, Log>(&format!(
        "SELECT {} FROM logs
         WHERE ($1::timestamptz IS NULL OR date >= $1)
           AND ($2::timestamptz IS NULL OR date <= $2)
         ORDER BY created_at DESC
         LIMIT $3",
        LOG_COLUMNS
    ))
    .bind(filter.start)
    .bind(filter.end)
    .bind(filter.limit)
    .fetch_all(&pool)
    .await?;

    Ok(logs)
}

pub async fn create_log(log: &NewLog) -> Result<Log, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let created = sqlx::query_as::<_, Log>(&format!(
        "INSERT INTO logs (date, agent, client, type, status, protocol)
         VALUES (COALESCE($1, NOW()), $2, $3, $4, $5, $6)
         RETURNING {}",
        LOG_COLUMNS
    ))
    .bind(log.date)
    .bind(&log.agent)
    .bind(&log.client)
    .bind(&log.kind)
    .bind(&log.status)
    .bind(&log.protocol)
    .fetch_one(&pool)
    .await?;

    Ok(created)
}
