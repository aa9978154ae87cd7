use sqlx::SqlitePool;

const SCHEMA_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    phone TEXT,
    created_at INTEGER NOT NULL
)
"#;

const SCHEMA_STRATEGIES: &str = r#"
CREATE TABLE IF NOT EXISTS strategies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    ticker TEXT NOT NULL,
    strategy_type TEXT NOT NULL,
    condition TEXT NOT NULL,
    threshold REAL,
    parameters TEXT,
    raw_description TEXT,
    active INTEGER DEFAULT 1,
    created_at INTEGER NOT NULL,
    triggered_at INTEGER,
    FOREIGN KEY (user_id) REFERENCES users (id)
)
"#;

const SCHEMA_ALERTS: &str = r#"
CREATE TABLE IF NOT EXISTS alerts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    strategy_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    message TEXT NOT NULL,
    sent_at INTEGER NOT NULL,
    FOREIGN KEY (strategy_id) REFERENCES strategies (id),
    FOREIGN KEY (user_id) REFERENCES users (id)
)
"#;

// helpful for the monitor scan (active + not yet triggered)
const INDEX_STRATEGIES_SCAN: &str =
    "CREATE INDEX IF NOT EXISTS idx_strategies_active ON strategies (active, triggered_at)";

pub async fn ensure_schema(db: &SqlitePool) -> Result<(), String> {
    for stmt in [
        SCHEMA_USERS,
        SCHEMA_STRATEGIES,
        SCHEMA_ALERTS,
        INDEX_STRATEGIES_SCAN,
    ] {
        sqlx::query(stmt)
            .execute(db)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
