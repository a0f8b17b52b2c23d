//! Panel configuration
//!
//! The device geometry and the page definitions, loaded from a JSON file.
//! Page lines may be authored in either schema generation; see the `page`
//! module for the shapes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::display::Color;
use crate::page::PageConfig;

/// Fixed character grid of the target panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayGeometry {
    pub columns: usize,
    pub rows: usize,
    pub default_color: Color,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        // The MCDU panel: 24 columns by 14 rows.
        Self {
            columns: 24,
            rows: 14,
            default_color: Color::White,
        }
    }
}

/// Everything the bridge needs to drive one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    pub display: DisplayGeometry,
    pub pages: Vec<PageConfig>,
}

impl PanelConfig {
    /// Load a panel config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("panel config not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let config: PanelConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::info!(
            "loaded {} pages from {}",
            config.pages.len(),
            path.display()
        );

        Ok(config)
    }

    /// Look up a page definition by id.
    pub fn page(&self, id: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|page| page.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_defaults() {
        let geometry: DisplayGeometry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(geometry.columns, 24);
        assert_eq!(geometry.rows, 14);
        assert_eq!(geometry.default_color, Color::White);
    }

    #[test]
    fn test_config_parses_mixed_generation_pages() {
        let config: PanelConfig = serde_json::from_value(json!({
            "display": { "columns": 24, "rows": 14, "defaultColor": "white" },
            "pages": [
                {
                    "id": "home-main",
                    "name": "Home",
                    "lines": [
                        { "row": 1, "display": { "type": "label", "label": "WELCOME" } },
                        { "row": 3, "left": { "label": "NEU", "display": { "type": "label", "text": "21.5 C" } } }
                    ]
                }
            ]
        }))
        .unwrap();
        let page = config.page("home-main").unwrap();
        assert_eq!(page.name.as_deref(), Some("Home"));
        assert_eq!(page.lines.len(), 2);
        assert!(config.page("missing").is_none());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = PanelConfig::load("/nonexistent/leitstand.json").unwrap();
        assert_eq!(config.display, DisplayGeometry::default());
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join("leitstand-config-test.json");
        let config = PanelConfig {
            display: DisplayGeometry::default(),
            pages: vec![serde_json::from_value(json!({ "id": "p1", "lines": [] })).unwrap()],
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        let loaded = PanelConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
