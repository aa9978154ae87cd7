use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Strategy {
    pub id: i64,
    pub user_id: i64,

    pub ticker: String,

    // PRICE | RSI | MACD | VOLUME | MA_CROSS
    pub strategy_type: String,

    // "above" | "below"
    pub condition: String,
    pub threshold: f64,

    // JSON object with free-form per-indicator extras
    pub parameters: String,
    pub raw_description: String,

    pub active: i64,
    pub created_at: i64,

    // set exactly once; a triggered strategy never fires again
    pub triggered_at: Option<i64>,
}

/// A strategy joined with its owner's contact info, the shape the monitor
/// scans each cycle.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveStrategy {
    pub id: i64,
    pub user_id: i64,
    pub ticker: String,
    pub strategy_type: String,
    pub condition: String,
    pub threshold: f64,
    pub email: String,
    pub phone: Option<String>,
}
