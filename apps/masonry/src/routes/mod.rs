pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::grid::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rendered page + its form target
        .route("/", get(handlers::handle_page))
        .route("/load-more", post(handlers::handle_load_more_form))
        // Grid API
        .route("/api/v1/grid", get(handlers::handle_get_grid))
        .route("/api/v1/grid/load-more", post(handlers::handle_load_more))
        .route("/api/v1/grid/viewport", post(handlers::handle_viewport))
        .with_state(state)
}
