use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{ActiveStrategy, Strategy};
use crate::parser::ParsedStrategy;

pub async fn create_strategy(
    db: &SqlitePool,
    user_id: i64,
    parsed: &ParsedStrategy,
) -> Result<i64, String> {
    let now = Utc::now().timestamp();
    let params = parsed.parameters.to_string();

    let res = sqlx::query(
        "INSERT INTO strategies \
         (user_id, ticker, strategy_type, condition, threshold, parameters, raw_description, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(&parsed.ticker)
    .bind(&parsed.strategy_type)
    .bind(&parsed.condition)
    .bind(parsed.threshold)
    .bind(&params)
    .bind(&parsed.raw_description)
    .bind(now)
    .execute(db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(res.last_insert_rowid())
}

pub async fn list_by_email(db: &SqlitePool, email: &str) -> Result<Vec<Strategy>, String> {
    sqlx::query_as::<_, Strategy>(
        "SELECT s.* FROM strategies s \
         JOIN users u ON s.user_id = u.id \
         WHERE u.email = ? \
         ORDER BY s.created_at DESC, s.id DESC",
    )
    .bind(email)
    .fetch_all(db)
    .await
    .map_err(|e| e.to_string())
}

/// Re-parse replaces what the strategy watches; the triggered flag is left
/// alone, so a fired alert stays fired. Returns false when no row belongs to
/// that id/email pair.
pub async fn update_strategy(
    db: &SqlitePool,
    id: i64,
    email: &str,
    parsed: &ParsedStrategy,
) -> Result<bool, String> {
    let res = sqlx::query(
        "UPDATE strategies \
         SET ticker = ?, strategy_type = ?, condition = ?, threshold = ?, raw_description = ? \
         WHERE id = ? AND user_id = (SELECT id FROM users WHERE email = ?)",
    )
    .bind(&parsed.ticker)
    .bind(&parsed.strategy_type)
    .bind(&parsed.condition)
    .bind(parsed.threshold)
    .bind(&parsed.raw_description)
    .bind(id)
    .bind(email)
    .execute(db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(res.rows_affected() > 0)
}

/// Everything the monitor should evaluate, joined with owner contact info.
pub async fn list_active(db: &SqlitePool) -> Result<Vec<ActiveStrategy>, String> {
    sqlx::query_as::<_, ActiveStrategy>(
        "SELECT s.id, s.user_id, s.ticker, s.strategy_type, s.condition, s.threshold, \
                u.email, u.phone \
         FROM strategies s \
         JOIN users u ON s.user_id = u.id \
         WHERE s.active = 1 AND s.triggered_at IS NULL",
    )
    .fetch_all(db)
    .await
    .map_err(|e| e.to_string())
}

/// Returns true if the strategy was newly triggered, false if it had already
/// fired.
pub async fn mark_triggered(db: &SqlitePool, id: i64) -> Result<bool, String> {
    let now = Utc::now().timestamp();

    let res =
        sqlx::query("UPDATE strategies SET triggered_at = ? WHERE id = ? AND triggered_at IS NULL")
            .bind(now)
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| e.to_string())?;

    Ok(res.rows_affected() > 0)
}

#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub users: i64,
    pub active_strategies: i64,
    pub alerts_sent: i64,
}

pub async fn stats(db: &SqlitePool) -> Result<Stats, String> {
    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
        .map_err(|e| e.to_string())?;

    let (active_strategies,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM strategies WHERE active = 1")
            .fetch_one(db)
            .await
            .map_err(|e| e.to_string())?;

    let (alerts_sent,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM alerts")
        .fetch_one(db)
        .await
        .map_err(|e| e.to_string())?;

    Ok(Stats {
        users,
        active_strategies,
        alerts_sent,
    })
}
