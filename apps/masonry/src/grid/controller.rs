//! Grid Controller: orchestrates fetch → resolve heights → balance → render.
//!
//! # Phases
//! `Idle → Loading → Ready` once at startup, then `Ready → Updating → Ready` for
//! every "load more" and `Ready → Resizing → Ready` whenever the viewport moves
//! into a different column-count bucket.
//!
//! Updates are append-only: only the new batch is resolved and it is placed on
//! top of the existing column totals. A resize throws the columns away and
//! replays the whole accumulated history, so the same history and column count
//! always produce the same layout.
//!
//! Every transition resolves all heights of its batch before placing a single
//! post, and placement follows batch order rather than resolution order.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::{column_count_for_width, ColumnState};
use crate::models::Post;
use crate::render::GridRenderer;
use crate::resolver::HeightResolver;
use crate::source::{fetch_or_empty, PostSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPhase {
    Idle,
    Loading,
    Ready,
    Updating,
    Resizing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid has not finished its initial load")]
    NotStarted,
}

#[derive(Debug, Clone)]
pub struct GridOptions {
    pub batch_limit: u32,
    pub query: String,
    /// Viewport width the first layout is computed for.
    pub viewport_width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSnapshot {
    pub height: u64,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridSnapshot {
    pub phase: GridPhase,
    pub column_count: usize,
    pub total_posts: usize,
    pub columns: Vec<ColumnSnapshot>,
}

pub struct GridController {
    source: Arc<dyn PostSource>,
    resolver: HeightResolver,
    renderer: Arc<dyn GridRenderer>,
    options: GridOptions,
    phase: GridPhase,
    layout: ColumnState,
    /// Every post fetched so far, in fetch order. Replayed on resize.
    history: Vec<Post>,
}

impl GridController {
    pub fn new(
        source: Arc<dyn PostSource>,
        resolver: HeightResolver,
        renderer: Arc<dyn GridRenderer>,
        options: GridOptions,
    ) -> Self {
        let column_count = column_count_for_width(options.viewport_width);
        Self {
            source,
            resolver,
            renderer,
            options,
            phase: GridPhase::Idle,
            layout: ColumnState::new(column_count),
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    pub fn column_heights(&self) -> &[u64] {
        self.layout.heights()
    }

    pub fn columns(&self) -> &[Vec<Post>] {
        self.layout.columns()
    }

    pub fn history(&self) -> &[Post] {
        &self.history
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let columns = self
            .columns()
            .iter()
            .zip(self.column_heights())
            .map(|(posts, height)| ColumnSnapshot {
                height: *height,
                posts: posts.clone(),
            })
            .collect();

        GridSnapshot {
            phase: self.phase(),
            column_count: self.column_count(),
            total_posts: self.layout.len(),
            columns,
        }
    }

    /// Initial load. Does nothing if the grid has already started.
    pub async fn start(&mut self) {
        if self.phase != GridPhase::Idle {
            return;
        }
        self.transition(GridPhase::Loading);

        let posts = self.fetch().await;
        info!(
            "Initial batch: {} posts across {} columns",
            posts.len(),
            self.layout.column_count()
        );
        place(&self.resolver, &mut self.layout, &posts).await;
        self.history = posts;
        self.render();

        self.transition(GridPhase::Ready);
    }

    /// Appends `new_posts` to the grid. An empty batch is a no-op.
    pub async fn update(&mut self, new_posts: Vec<Post>) -> Result<(), GridError> {
        self.ensure_started()?;
        if new_posts.is_empty() {
            debug!("Empty batch, grid unchanged");
            return Ok(());
        }
        self.transition(GridPhase::Updating);

        place(&self.resolver, &mut self.layout, &new_posts).await;
        self.history.extend(new_posts);
        self.render();

        self.transition(GridPhase::Ready);
        Ok(())
    }

    /// Fetches another batch and appends it. Returns how many posts arrived.
    pub async fn on_load_more(&mut self) -> Result<usize, GridError> {
        self.ensure_started()?;
        let posts = self.fetch().await;
        let fetched = posts.len();
        self.update(posts).await?;
        info!("Load more: {fetched} new posts, {} total", self.history.len());
        Ok(fetched)
    }

    /// Re-lays the grid if `width` falls into a different column bucket.
    /// Returns whether a re-layout happened.
    pub async fn on_viewport_change(&mut self, width: u32) -> Result<bool, GridError> {
        self.ensure_started()?;
        let column_count = column_count_for_width(width);
        if column_count == self.layout.column_count() {
            return Ok(false);
        }
        self.transition(GridPhase::Resizing);
        info!(
            "Viewport {width}px: {} → {column_count} columns, replaying {} posts",
            self.layout.column_count(),
            self.history.len()
        );

        self.layout = ColumnState::new(column_count);
        place(&self.resolver, &mut self.layout, &self.history).await;
        self.render();

        self.transition(GridPhase::Ready);
        Ok(true)
    }

    async fn fetch(&self) -> Vec<Post> {
        fetch_or_empty(
            self.source.as_ref(),
            self.options.batch_limit,
            &self.options.query,
        )
        .await
    }

    fn render(&self) {
        self.renderer.render(self.layout.columns());
    }

    fn ensure_started(&self) -> Result<(), GridError> {
        match self.phase {
            GridPhase::Idle | GridPhase::Loading => Err(GridError::NotStarted),
            _ => Ok(()),
        }
    }

    fn transition(&mut self, next: GridPhase) {
        debug!("Grid phase {:?} → {:?}", self.phase, next);
        self.phase = next;
    }
}

/// Resolves every height in `posts`, then places them in batch order.
async fn place(resolver: &HeightResolver, layout: &mut ColumnState, posts: &[Post]) {
    let heights = resolver.resolve_batch(posts).await;
    layout.distribute(posts, &heights);
}
