//! Page configuration schema
//!
//! Pages arrive from the config layer in one of two generations: the old
//! single-display-per-row shape (`subLabel`/`display`/`leftButton`/
//! `rightButton`) and the current two-sided shape (`left`/`right`, each a
//! uniform label/display/button triple). One serde type accepts both;
//! classification and conversion live in [`normalize`]. Both generations
//! must keep parsing indefinitely — existing installations never rewrite
//! their page files.

pub mod normalize;

pub use normalize::{
    classify, display_text, is_legacy, normalize_line, normalize_page, Line, LineInput, Page,
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::display::Color;

/// What a display field renders as.
///
/// Only `label` carries content today; anything unrecognized parses as
/// `Unknown` and renders as empty text instead of failing the page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    #[default]
    Empty,
    Label,
    Unknown,
}

impl<'de> Deserialize<'de> for DisplayKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "empty" => Self::Empty,
            "label" => Self::Label,
            _ => Self::Unknown,
        })
    }
}

/// A display field as authored in config.
///
/// Text payloads were written under `label` in old configs and `text` in new
/// ones; both keys are accepted and [`display_text`] resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayField {
    #[serde(rename = "type", default)]
    pub kind: DisplayKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DisplayField {
    /// A field that renders the given text.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            kind: DisplayKind::Label,
            text: Some(text.into()),
            label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == DisplayKind::Empty
    }
}

/// Opaque button descriptor, passed through to the dispatch layer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonField(pub Value);

impl Default for ButtonField {
    fn default() -> Self {
        Self(json!({ "type": "empty" }))
    }
}

impl ButtonField {
    pub fn is_empty(&self) -> bool {
        match self.0.get("type").and_then(Value::as_str) {
            Some(kind) => kind == "empty",
            None => self.0.is_null(),
        }
    }
}

/// One half of a two-sided row. Missing fields default per-field, so a side
/// authored as `{"label": "KUECHE"}` still gets an empty display and button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Side {
    pub label: String,
    pub display: DisplayField,
    pub button: ButtonField,
}

/// A raw line as authored, accepting both schema generations at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    #[serde(default)]
    pub row: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_button: Option<ButtonField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_button: Option<ButtonField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A named page. `lines` tolerates JSON `null` entries; they are skipped
/// during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub lines: Vec<Option<LineConfig>>,
}
