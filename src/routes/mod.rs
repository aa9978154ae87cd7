use axum::Router;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod strategies_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = strategies_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .with_state(state)
}
