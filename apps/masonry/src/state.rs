use std::sync::Arc;

use tokio::sync::Mutex;

use crate::grid::GridController;
use crate::render::HtmlRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The page-lifetime grid. Transitions hold the lock until they finish,
    /// so they run one at a time and are never cancelled.
    pub grid: Arc<Mutex<GridController>>,
    /// Same renderer the controller paints into; read for the latest page.
    pub renderer: Arc<HtmlRenderer>,
}
