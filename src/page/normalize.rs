//! Line normalizer
//!
//! Converts lines from either schema generation into the canonical
//! two-sided shape. Classification happens once per line via [`classify`];
//! everything downstream of this module only ever sees [`Line`] values with
//! both sides fully defaulted.
//!
//! The legacy conversion is a one-way compatibility shim: the old schema has
//! a single `display` slot, and it always lands on the left side. There is
//! no legacy spelling that can populate the right column.

use serde::Serialize;

use super::{ButtonField, DisplayField, LineConfig, PageConfig, Side};
use crate::display::Color;

/// A line in canonical form, every field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub row: u32,
    pub left: Side,
    pub right: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A page whose lines are all canonical.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub name: Option<String>,
    pub lines: Vec<Line>,
}

impl Page {
    /// Title shown on the status bar: the configured name, or the id.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A raw line tagged with the schema generation it was authored in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineInput<'a> {
    Legacy(&'a LineConfig),
    Canonical(&'a LineConfig),
}

/// True iff the line uses the old single-display schema: it carries at
/// least one legacy field and neither `left` nor `right`. A line carrying
/// both generations counts as canonical — the canonical fields win.
pub fn is_legacy(line: &LineConfig) -> bool {
    let has_legacy_field = line.display.is_some()
        || line.left_button.is_some()
        || line.right_button.is_some()
        || line.sub_label.is_some();
    has_legacy_field && line.left.is_none() && line.right.is_none()
}

/// Classify a raw line into exactly one schema generation.
pub fn classify(line: &LineConfig) -> LineInput<'_> {
    if is_legacy(line) {
        LineInput::Legacy(line)
    } else {
        LineInput::Canonical(line)
    }
}

/// Resolve the text of a display field. Old configs wrote the payload under
/// `label`, new ones under `text`; an empty `text` falls through to `label`.
pub fn display_text(display: &DisplayField) -> &str {
    display
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .or(display.label.as_deref())
        .unwrap_or("")
}

/// Normalize one line to the canonical two-sided shape.
///
/// Idempotent: feeding a normalized line back through (via its canonical
/// serialization) yields an equal line.
pub fn normalize_line(line: &LineConfig) -> Line {
    match classify(line) {
        LineInput::Canonical(line) => Line {
            row: line.row,
            left: line.left.clone().unwrap_or_default(),
            right: line.right.clone().unwrap_or_default(),
            color: line.color,
        },
        LineInput::Legacy(line) => {
            let mut left = Side {
                label: line.sub_label.clone().unwrap_or_default(),
                display: DisplayField::default(),
                button: line.left_button.clone().unwrap_or_default(),
            };
            // The single legacy display slot maps to the left column.
            if let Some(display) = &line.display {
                if !display.is_empty() {
                    left.display = unify_text_key(display.clone());
                }
            }
            let right = Side {
                label: String::new(),
                display: DisplayField::default(),
                button: line.right_button.clone().unwrap_or_default(),
            };
            Line {
                row: line.row,
                left,
                right,
                color: line.color,
            }
        }
    }
}

/// Copy a `label` payload into `text` when `text` is absent or empty.
fn unify_text_key(mut display: DisplayField) -> DisplayField {
    let text_missing = display.text.as_deref().is_none_or(str::is_empty);
    if text_missing {
        if let Some(label) = &display.label {
            if !label.is_empty() {
                display.text = Some(label.clone());
            }
        }
    }
    display
}

/// Normalize every line of a page. `null` entries in the authored line list
/// are skipped — the renderer ignores them either way.
pub fn normalize_page(page: &PageConfig) -> Page {
    Page {
        id: page.id.clone(),
        name: page.name.clone(),
        lines: page.lines.iter().flatten().map(normalize_line).collect(),
    }
}
