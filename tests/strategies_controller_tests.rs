use axum::{
    Router,
    http::{Request, StatusCode, header},
    routing::{get, post},
};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use stratalerts::controllers::strategies_controller;
use stratalerts::parser::{StrategyParser, Tables};
use stratalerts::services::{db_init, mailer, market};
use stratalerts::{AppState, config, routes};

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.market_api_key = String::new();
    settings.smtp_host = String::new();

    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("sqlite pool");

    db_init::ensure_schema(&db).await.expect("schema");

    AppState {
        db,
        parser: StrategyParser::new(Tables::builtin()),
        market: market::MarketClient::new(
            settings.market_base_url.clone(),
            settings.market_api_key.clone(),
        ),
        mailer: mailer::Mailer::new(&settings),
        settings,
    }
}

fn strategies_app(state: AppState) -> Router {
    Router::new()
        .route("/add-strategy", post(strategies_controller::post_add_strategy))
        .route("/get-strategies", get(strategies_controller::get_strategies))
        .route(
            "/update-strategy",
            post(strategies_controller::post_update_strategy),
        )
        .with_state(state)
}

fn json_post(uri: &str, body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn json_get(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn add_strategy_parses_and_stores() {
    let app = strategies_app(test_state().await);

    let req = json_post(
        "/add-strategy",
        r#"{"email":"test@example.com","strategy":"Alert me when Apple goes above $220"}"#,
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["strategy_id"], 1);
    assert_eq!(body["parsed"]["ticker"], "AAPL");
    assert_eq!(body["parsed"]["type"], "PRICE");
    assert_eq!(body["parsed"]["condition"], "above");
    assert_eq!(body["parsed"]["threshold"], 220.0);
}

#[tokio::test]
async fn add_strategy_without_fields_reports_error() {
    let app = strategies_app(test_state().await);

    let req = json_post("/add-strategy", r#"{"email":"test@example.com"}"#);

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email and strategy required");
}

#[tokio::test]
async fn get_strategies_returns_what_was_added() {
    let app = strategies_app(test_state().await);

    let res = app
        .clone()
        .oneshot(json_post(
            "/add-strategy",
            r#"{"email":"list@example.com","strategy":"tesla below 180"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response_json(res).await["success"], true);

    let res = app
        .oneshot(json_get("/get-strategies?email=list%40example.com"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["success"], true);

    let strategies = body["strategies"].as_array().unwrap();
    assert_eq!(strategies.len(), 1);
    assert_eq!(strategies[0]["email"], "list@example.com");
    assert_eq!(strategies[0]["ticker"], "TSLA");
    assert_eq!(strategies[0]["condition"], "below");
    assert_eq!(strategies[0]["threshold"], 180.0);
    assert_eq!(strategies[0]["active"], true);
    assert!(strategies[0]["triggered_at"].is_null());
}

#[tokio::test]
async fn get_strategies_requires_email() {
    let app = strategies_app(test_state().await);

    let res = app.oneshot(json_get("/get-strategies")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email required");
}

#[tokio::test]
async fn update_strategy_reparses_for_the_owner_only() {
    let app = strategies_app(test_state().await);

    let res = app
        .clone()
        .oneshot(json_post(
            "/add-strategy",
            r#"{"email":"owner@example.com","strategy":"apple above 100"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response_json(res).await["success"], true);

    // wrong owner
    let res = app
        .clone()
        .oneshot(json_post(
            "/update-strategy",
            r#"{"id":1,"email":"other@example.com","strategy":"tesla below 50"}"#,
        ))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert_eq!(body["success"], false);

    // right owner
    let res = app
        .clone()
        .oneshot(json_post(
            "/update-strategy",
            r#"{"id":1,"email":"owner@example.com","strategy":"tesla below 50"}"#,
        ))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["parsed"]["ticker"], "TSLA");
    assert_eq!(body["parsed"]["condition"], "below");

    let res = app
        .oneshot(json_get("/get-strategies?email=owner%40example.com"))
        .await
        .unwrap();
    let body = response_json(res).await;
    assert_eq!(body["strategies"][0]["ticker"], "TSLA");
    assert_eq!(body["strategies"][0]["threshold"], 50.0);
}

#[tokio::test]
async fn update_strategy_with_missing_fields_reports_error() {
    let app = strategies_app(test_state().await);

    let res = app
        .oneshot(json_post(
            "/update-strategy",
            r#"{"email":"owner@example.com","strategy":"tesla below 50"}"#,
        ))
        .await
        .unwrap();

    let body = response_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing fields");
}

#[tokio::test]
async fn health_is_ok_and_unknown_routes_are_json_404() {
    let app = routes::app(test_state().await);

    let res = app.clone().oneshot(json_get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(response_json(res).await["status"], "ok");

    let res = app.clone().oneshot(json_get("/health/db")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.oneshot(json_get("/no-such-route")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(res).await["success"], false);
}
