use chrono::Utc;
use sqlx::SqlitePool;

/// Get-or-create keyed on the unique email: a duplicate insert falls back to
/// a lookup, so both calls return the same id.
pub async fn add_user(db: &SqlitePool, email: &str, phone: Option<&str>) -> Result<i64, String> {
    let now = Utc::now().timestamp();

    let inserted = sqlx::query("INSERT INTO users (email, phone, created_at) VALUES (?, ?, ?)")
        .bind(email)
        .bind(phone)
        .bind(now)
        .execute(db)
        .await;

    match inserted {
        Ok(res) => Ok(res.last_insert_rowid()),
        Err(e) => {
            let msg = e.to_string();
            if !msg.contains("UNIQUE constraint failed") {
                return Err(msg);
            }

            let (id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE email = ?")
                .bind(email)
                .fetch_one(db)
                .await
                .map_err(|e| e.to_string())?;

            Ok(id)
        }
    }
}
