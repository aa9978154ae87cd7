use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::services::{strategies_service, user_service};

// Errors ride a 200 with a success flag; clients branch on the flag, not the
// status code.
fn error_response(msg: impl Into<String>) -> Response {
    Json(json!({ "success": false, "error": msg.into() })).into_response()
}

#[derive(Deserialize)]
pub struct AddStrategyBody {
    pub email: Option<String>,
    pub strategy: Option<String>,
    pub phone: Option<String>,
}

// POST /add-strategy
pub async fn post_add_strategy(
    State(state): State<AppState>,
    Json(body): Json<AddStrategyBody>,
) -> Response {
    let email = body.email.as_deref().unwrap_or("").trim();
    let text = body.strategy.as_deref().unwrap_or("").trim();

    if email.is_empty() || text.is_empty() {
        return error_response("Email and strategy required");
    }

    let user_id = match user_service::add_user(&state.db, email, body.phone.as_deref()).await {
        Ok(id) => id,
        Err(e) => return error_response(format!("db error: {e}")),
    };

    let parsed = state.parser.parse(text);

    let strategy_id = match strategies_service::create_strategy(&state.db, user_id, &parsed).await {
        Ok(id) => id,
        Err(e) => return error_response(format!("db error: {e}")),
    };

    tracing::info!("strategy #{strategy_id} created for {email}");

    Json(json!({ "success": true, "strategy_id": strategy_id, "parsed": parsed })).into_response()
}

#[derive(Deserialize)]
pub struct StrategiesQuery {
    pub email: Option<String>,
}

// GET /get-strategies?email=
pub async fn get_strategies(
    State(state): State<AppState>,
    Query(query): Query<StrategiesQuery>,
) -> Response {
    let email = query.email.as_deref().unwrap_or("").trim();

    if email.is_empty() {
        return error_response("Email required");
    }

    let strategies = match strategies_service::list_by_email(&state.db, email).await {
        Ok(v) => v,
        Err(e) => return error_response(format!("db error: {e}")),
    };

    let items: Vec<serde_json::Value> = strategies
        .into_iter()
        .map(|s| {
            json!({
                "id": s.id,
                "email": email,
                "ticker": s.ticker,
                "strategy_type": s.strategy_type,
                "condition": s.condition,
                "threshold": s.threshold,
                "parameters": serde_json::from_str::<serde_json::Value>(&s.parameters)
                    .unwrap_or_else(|_| json!({})),
                "raw_description": s.raw_description,
                "active": s.active == 1,
                "created_at": s.created_at,
                "triggered_at": s.triggered_at,
            })
        })
        .collect();

    Json(json!({ "success": true, "strategies": items })).into_response()
}

#[derive(Deserialize)]
pub struct UpdateStrategyBody {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub strategy: Option<String>,
}

// POST /update-strategy
pub async fn post_update_strategy(
    State(state): State<AppState>,
    Json(body): Json<UpdateStrategyBody>,
) -> Response {
    let email = body.email.as_deref().unwrap_or("").trim();
    let text = body.strategy.as_deref().unwrap_or("").trim();

    let Some(id) = body.id else {
        return error_response("Missing fields");
    };

    if email.is_empty() || text.is_empty() {
        return error_response("Missing fields");
    }

    let parsed = state.parser.parse(text);

    match strategies_service::update_strategy(&state.db, id, email, &parsed).await {
        Ok(true) => Json(json!({ "success": true, "parsed": parsed })).into_response(),
        Ok(false) => error_response("No matching strategy for this email"),
        Err(e) => error_response(format!("db error: {e}")),
    }
}
