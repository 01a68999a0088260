//! Grid Renderer: paints columns of posts.
//!
//! The controller only ever hands columns to a [`GridRenderer`]; it never reads
//! anything back. [`HtmlRenderer`] keeps the most recent page so the HTTP layer
//! can serve it (last render wins).

pub mod page;

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::Post;

pub trait GridRenderer: Send + Sync {
    fn render(&self, columns: &[Vec<Post>]);
}

/// The output of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedGrid {
    /// Incremented on every render; 0 means nothing has been rendered yet.
    pub revision: u64,
    pub rendered_at: DateTime<Utc>,
    pub columns: Vec<Vec<Post>>,
    #[serde(skip)]
    pub html: String,
}

pub struct HtmlRenderer {
    latest: RwLock<RenderedGrid>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(RenderedGrid {
                revision: 0,
                rendered_at: Utc::now(),
                columns: Vec::new(),
                html: page::render_page(&[]).into_string(),
            }),
        }
    }

    pub fn latest(&self) -> RenderedGrid {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GridRenderer for HtmlRenderer {
    fn render(&self, columns: &[Vec<Post>]) {
        let html = page::render_page(columns).into_string();
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        latest.revision += 1;
        latest.rendered_at = Utc::now();
        latest.columns = columns.to_vec();
        latest.html = html;
        debug!(
            "Rendered grid revision {} ({} columns)",
            latest.revision,
            columns.len()
        );
    }
}
