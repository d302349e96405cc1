use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::setting::{SettingRow, Settings};

pub async fn load_settings() -> Result<Settings, DatabaseError> {
    let pool = DatabaseManager::pool()?;

    let rows = sqlx::query_as::<_, SettingRow>("SELECT key, value FROM settings")
        .fetch_all(&pool)
        .await?;

    Ok(Settings::from_rows(rows))
}

/// Upserts every present key inside one transaction. Rows whose value is
/// unchanged are left untouched, so repeating a write is a no-op.
pub async fn save_settings(settings: &Settings) -> Result<u64, DatabaseError> {
    let pool = DatabaseManager::pool()?;
    let mut tx = pool.begin().await?;

    let mut changed = 0;
    for row in settings.to_rows() {
        let result = sqlx::query(
            "INSERT INTO settings (key, value, updated_at) VALUES ($1, $2, NOW())
             ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = NOW()
                WHERE settings.value IS DISTINCT FROM EXCLUDED.value",
        )
        .bind(&row.key)
        .bind(&row.value)
        .execute(&mut *tx)
        .await?;
        changed += result.rows_affected();
    }

    tx.commit().await?;
    Ok(changed)
}

pub async fn save_setting(key: &str, value: &str) -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool()?;
    sqlx::query(
        "INSERT INTO settings (key, value, updated_at) VALUES ($1, $2, NOW())
         ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            WHERE settings.value IS DISTINCT FROM EXCLUDED.value",
    )
    .bind(key)
    .bind(value)
    .execute(&pool)
    .await?;
    Ok(())
}
