use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per delivered alert; the table is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertEvent {
    pub id: i64,
    pub strategy_id: i64,
    pub user_id: i64,
    pub message: String,
    pub sent_at: i64,
}
