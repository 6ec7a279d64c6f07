use crate::{models::config::GameConfig, routes, state::AppState};
use axum::Router;

pub fn create_app() -> Router {
    create_app_with_state(AppState::new())
}

pub fn create_app_with_config(config: GameConfig) -> Router {
    create_app_with_state(AppState::with_config(config))
}

pub fn create_app_with_state(state: AppState) -> Router {
    routes::create_routes(state)
}
