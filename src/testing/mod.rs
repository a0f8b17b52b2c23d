//! Test doubles for the collaborator boundaries
//!
//! A recording publisher and an in-memory config adapter, used by the unit
//! and integration tests to drive the renderer without a device or a config
//! file on disk.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::ConfigAdapter;
use crate::config::DisplayGeometry;
use crate::display::{Color, DisplayPublisher, RenderedLine};
use crate::page::PageConfig;

/// `ConfigAdapter` over a fixed page list and state map.
pub struct MockAdapter {
    geometry: DisplayGeometry,
    pages: Vec<PageConfig>,
    states: Mutex<HashMap<String, Value>>,
}

impl MockAdapter {
    pub fn new(pages: Vec<PageConfig>) -> Self {
        Self {
            geometry: DisplayGeometry::default(),
            pages,
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_geometry(mut self, geometry: DisplayGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn push_page(&mut self, page: PageConfig) {
        self.pages.push(page);
    }

    pub fn set_state(&self, id: impl Into<String>, value: Value) {
        self.states.lock().unwrap().insert(id.into(), value);
    }
}

#[async_trait]
impl ConfigAdapter for MockAdapter {
    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    async fn page(&self, id: &str) -> Option<PageConfig> {
        self.pages.iter().find(|page| page.id == id).cloned()
    }

    async fn state_value(&self, id: &str) -> Option<Value> {
        self.states.lock().unwrap().get(id).cloned()
    }
}

/// A published single-row update, as captured by [`MockPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedLine {
    pub row: usize,
    pub text: String,
    pub color: Color,
}

/// `DisplayPublisher` that records everything it is handed.
#[derive(Default)]
pub struct MockPublisher {
    frames: Mutex<Vec<Vec<RenderedLine>>>,
    lines: Mutex<Vec<PublishedLine>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every full frame published so far, oldest first.
    pub fn frames(&self) -> Vec<Vec<RenderedLine>> {
        self.frames.lock().unwrap().clone()
    }

    /// The most recently published full frame.
    pub fn last_frame(&self) -> Option<Vec<RenderedLine>> {
        self.frames.lock().unwrap().last().cloned()
    }

    /// Every single-row update published so far.
    pub fn lines(&self) -> Vec<PublishedLine> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl DisplayPublisher for MockPublisher {
    async fn publish_full_display(&self, lines: &[RenderedLine]) -> Result<()> {
        self.frames.lock().unwrap().push(lines.to_vec());
        Ok(())
    }

    async fn publish_line(&self, row: usize, text: &str, color: Color) -> Result<()> {
        self.lines.lock().unwrap().push(PublishedLine {
            row,
            text: text.to_string(),
            color,
        });
        Ok(())
    }
}
