//! Display output layer
//!
//! The renderer produces a full grid of `RenderedLine`s; a `DisplayPublisher`
//! is responsible for getting that grid onto a physical panel. The transport
//! itself (MQTT, serial, whatever the device speaks) lives behind the trait;
//! this crate ships a terminal preview publisher and a recording mock.

mod term;

pub use term::TerminalPublisher;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// The MCDU color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Green,
    Yellow,
    Amber,
    Red,
    Magenta,
    #[default]
    White,
}

impl Color {
    /// Parse a config color name. Unknown names map to white, so a typo in
    /// a page definition degrades instead of killing the render.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "cyan" => Self::Cyan,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "amber" => Self::Amber,
            "red" => Self::Red,
            "magenta" => Self::Magenta,
            _ => Self::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Amber => "amber",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::White => "white",
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// Marker color for sub-label rows and the status bar.
pub const SUB_LABEL_COLOR: Color = Color::Cyan;

/// Marker color for the page-not-found layout.
pub const ERROR_COLOR: Color = Color::Red;

/// One finished display row: exactly `columns` characters plus a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub text: String,
    pub color: Color,
}

impl RenderedLine {
    /// A row of `width` spaces in the given color.
    pub fn blank(width: usize, color: Color) -> Self {
        Self {
            text: " ".repeat(width),
            color,
        }
    }
}

/// A full display frame, always `geometry.rows` lines long.
pub type RenderedDisplay = Vec<RenderedLine>;

/// Boundary to whatever ships rows to the physical panel.
#[async_trait]
pub trait DisplayPublisher: Send + Sync {
    /// Publish a complete frame, replacing everything on the panel.
    async fn publish_full_display(&self, lines: &[RenderedLine]) -> Result<()>;

    /// Publish a single row update. Not used by the page renderer itself,
    /// kept on the boundary for callers that patch individual rows.
    async fn publish_line(&self, row: usize, text: &str, color: Color) -> Result<()>;
}
