use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::AlertEvent;

/// Append one row to the alert history after a successful dispatch.
pub async fn log_event(
    db: &SqlitePool,
    strategy_id: i64,
    user_id: i64,
    message: &str,
) -> Result<i64, String> {
    let now = Utc::now().timestamp();

    let res =
        sqlx::query("INSERT INTO alerts (strategy_id, user_id, message, sent_at) VALUES (?, ?, ?, ?)")
            .bind(strategy_id)
            .bind(user_id)
            .bind(message)
            .bind(now)
            .execute(db)
            .await
            .map_err(|e| e.to_string())?;

    Ok(res.last_insert_rowid())
}

pub async fn list_for_user(db: &SqlitePool, user_id: i64) -> Result<Vec<AlertEvent>, String> {
    sqlx::query_as::<_, AlertEvent>(
        "SELECT id, strategy_id, user_id, message, sent_at \
         FROM alerts WHERE user_id = ? \
         ORDER BY sent_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .map_err(|e| e.to_string())
}
