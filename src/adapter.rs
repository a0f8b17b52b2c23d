//! Config adapter boundary
//!
//! The renderer never reads files or device state directly; it asks a
//! `ConfigAdapter`. The bundled [`StaticAdapter`] serves a loaded
//! [`PanelConfig`] plus an in-memory state map, which is all the preview
//! binary and the tests need. A home-automation backend implements the same
//! trait against its own store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::{DisplayGeometry, PanelConfig};
use crate::page::PageConfig;

/// Boundary to the configuration and device-state store.
#[async_trait]
pub trait ConfigAdapter: Send + Sync {
    /// The fixed grid of the target panel.
    fn geometry(&self) -> DisplayGeometry;

    /// Look up a page definition by id.
    async fn page(&self, id: &str) -> Option<PageConfig>;

    /// Look up an arbitrary device state, consumed by dynamic display
    /// fields. Ids are backend-specific.
    async fn state_value(&self, id: &str) -> Option<Value>;
}

/// A `ConfigAdapter` over a loaded config file and an in-memory state map.
pub struct StaticAdapter {
    config: PanelConfig,
    states: RwLock<HashMap<String, Value>>,
}

impl StaticAdapter {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Id of the first configured page, the natural startup target.
    pub fn first_page_id(&self) -> Option<&str> {
        self.config.pages.first().map(|page| page.id.as_str())
    }

    /// Store a device state value.
    pub async fn set_state(&self, id: impl Into<String>, value: Value) {
        self.states.write().await.insert(id.into(), value);
    }
}

#[async_trait]
impl ConfigAdapter for StaticAdapter {
    fn geometry(&self) -> DisplayGeometry {
        self.config.display
    }

    async fn page(&self, id: &str) -> Option<PageConfig> {
        self.config.page(id).cloned()
    }

    async fn state_value(&self, id: &str) -> Option<Value> {
        self.states.read().await.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> StaticAdapter {
        let config: PanelConfig = serde_json::from_value(json!({
            "pages": [
                { "id": "home", "name": "Home", "lines": [] },
                { "id": "licht", "lines": [] }
            ]
        }))
        .unwrap();
        StaticAdapter::new(config)
    }

    #[test]
    fn test_first_page_id() {
        assert_eq!(adapter().first_page_id(), Some("home"));
    }

    #[test]
    fn test_page_lookup() {
        let adapter = adapter();
        tokio_test::block_on(async {
            assert!(adapter.page("licht").await.is_some());
            assert!(adapter.page("garage").await.is_none());
        });
    }

    #[test]
    fn test_state_round_trip() {
        let adapter = adapter();
        tokio_test::block_on(async {
            assert_eq!(adapter.state_value("hm.0.temp").await, None);
            adapter.set_state("hm.0.temp", json!(21.5)).await;
            assert_eq!(adapter.state_value("hm.0.temp").await, Some(json!(21.5)));
        });
    }
}
