use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::grid::GridSnapshot;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GridResponse {
    #[serde(flatten)]
    pub grid: GridSnapshot,
    pub revision: u64,
    pub rendered_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
}

#[derive(Debug, Serialize)]
pub struct ViewportResponse {
    pub resized: bool,
    #[serde(flatten)]
    pub grid: GridResponse,
}

fn grid_response(state: &AppState, grid: GridSnapshot) -> GridResponse {
    let latest = state.renderer.latest();
    GridResponse {
        grid,
        revision: latest.revision,
        rendered_at: latest.rendered_at,
    }
}

/// GET /
/// Serves the most recently rendered page.
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    Html(state.renderer.latest().html)
}

/// GET /api/v1/grid
pub async fn handle_get_grid(State(state): State<AppState>) -> Json<GridResponse> {
    let snapshot = state.grid.lock().await.snapshot();
    Json(grid_response(&state, snapshot))
}

/// POST /api/v1/grid/load-more
pub async fn handle_load_more(
    State(state): State<AppState>,
) -> Result<Json<GridResponse>, AppError> {
    let snapshot = {
        let mut grid = state.grid.lock().await;
        grid.on_load_more().await?;
        grid.snapshot()
    };
    Ok(Json(grid_response(&state, snapshot)))
}

/// POST /load-more
/// Form target of the page's "Load more" button.
pub async fn handle_load_more_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.grid.lock().await.on_load_more().await?;
    Ok(Redirect::to("/"))
}

/// POST /api/v1/grid/viewport
pub async fn handle_viewport(
    State(state): State<AppState>,
    Json(req): Json<ViewportRequest>,
) -> Result<Json<ViewportResponse>, AppError> {
    let (resized, snapshot) = {
        let mut grid = state.grid.lock().await;
        let resized = grid.on_viewport_change(req.width).await?;
        (resized, grid.snapshot())
    };
    Ok(Json(ViewportResponse {
        resized,
        grid: grid_response(&state, snapshot),
    }))
}
