//! Page rendering
//!
//! [`PageRenderer`] is the stateful orchestrator: it fetches a page from the
//! config adapter, normalizes it, runs the pure layout in [`layout`], keeps
//! the returned pagination state for the next call, and hands the finished
//! frame to the display publisher. All grid arithmetic lives in the pure
//! submodules.

pub mod layout;
pub mod text;

pub use layout::{error_layout, layout_page, status_bar, PaginationState, PAGE_CAPACITY};
pub use text::{align_text, compose_row, pad_or_truncate, Align};

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, warn};

use crate::adapter::ConfigAdapter;
use crate::display::{DisplayPublisher, RenderedLine};
use crate::page::normalize_page;

/// Renders named pages onto the panel.
///
/// Holds the pagination state for the page it rendered last; every
/// `render_page` call recomputes and clamps it, so switching pages never
/// carries a stale offset along. Rendering takes `&mut self`, which keeps
/// overlapping renders on one instance from racing the pagination state.
pub struct PageRenderer<C, D> {
    adapter: Arc<C>,
    publisher: Arc<D>,
    pagination: PaginationState,
}

impl<C: ConfigAdapter, D: DisplayPublisher> PageRenderer<C, D> {
    pub fn new(adapter: Arc<C>, publisher: Arc<D>) -> Self {
        Self {
            adapter,
            publisher,
            pagination: PaginationState::default(),
        }
    }

    /// Current pagination state, for UI navigation.
    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Jump to a pagination offset. The next render clamps it.
    pub fn set_page_offset(&mut self, offset: usize) {
        self.pagination.page_offset = offset;
    }

    /// Move one pagination page forward.
    pub fn next_page(&mut self) {
        self.pagination.advance();
    }

    /// Move one pagination page back.
    pub fn prev_page(&mut self) {
        self.pagination.retreat();
    }

    /// Render `page_id` and publish the full frame.
    ///
    /// An unknown page id is a defined outcome, not an error: the
    /// not-found frame is published instead. The only errors surfacing
    /// here come from the publish transport.
    pub async fn render_page(&mut self, page_id: &str) -> Result<()> {
        let geometry = self.adapter.geometry();

        let Some(page) = self.adapter.page(page_id).await else {
            warn!("page '{}' not configured, publishing not-found frame", page_id);
            self.pagination = PaginationState::default();
            let frame = error_layout(&geometry);
            return self.publisher.publish_full_display(&frame).await;
        };

        let page = normalize_page(&page);
        let (frame, pagination) =
            layout_page(&page, &geometry, self.pagination, Local::now().time());
        debug!(
            page = %page.id,
            lines = page.lines.len(),
            offset = pagination.page_offset,
            total = pagination.total_pages,
            "rendered page"
        );
        self.pagination = pagination;
        self.publisher.publish_full_display(&frame).await
    }

    /// Build just the status bar row for `page_id`, against the current
    /// pagination state. Unknown ids fall back to the id as title.
    pub async fn render_status_bar(&self, page_id: &str) -> RenderedLine {
        let geometry = self.adapter.geometry();
        let title = match self.adapter.page(page_id).await {
            Some(page) => page.name.unwrap_or(page.id),
            None => page_id.to_string(),
        };
        status_bar(
            &title,
            self.pagination,
            Local::now().time(),
            geometry.columns,
        )
    }
}
