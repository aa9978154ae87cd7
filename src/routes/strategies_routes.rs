use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, controllers::strategies_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/add-strategy", post(strategies_controller::post_add_strategy))
        .route("/get-strategies", get(strategies_controller::get_strategies))
        .route(
            "/update-strategy",
            post(strategies_controller::post_update_strategy),
        )
}
