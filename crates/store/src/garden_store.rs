//! Versioned garden persistence.
//!
//! The garden is stored as a single envelope:
//!
//! ```text
//! { "version": 1, "key": "microgreens", "data": { "plots": [...], "profiles": [...], "deployments": [...] } }
//! ```
//!
//! Any document with a `data` key is treated as an envelope, whatever
//! its `version` says. A document without one is read as a bare `data`
//! section.

use std::sync::Arc;

use microgreens_core::garden::Garden;
use serde_json::{json, Value};

use crate::document::{DocumentStore, StoreError};

/// Current envelope version.
pub const STORAGE_VERSION: u64 = 1;

/// Key recorded in the envelope.
pub const STORAGE_KEY: &str = "microgreens";

/// Loads and saves the whole [`Garden`] through a [`DocumentStore`].
#[derive(Clone)]
pub struct GardenStore {
    backend: Arc<dyn DocumentStore>,
}

impl GardenStore {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    /// Load the garden; an empty store yields an empty garden.
    pub async fn load(&self) -> Result<Garden, StoreError> {
        let Some(document) = self.backend.load().await? else {
            tracing::info!("No stored garden, starting empty");
            return Ok(Garden::default());
        };

        let data = match document.get("data") {
            Some(data) => {
                match document.get("version").and_then(Value::as_u64) {
                    Some(version) if version > STORAGE_VERSION => tracing::warn!(
                        version,
                        supported = STORAGE_VERSION,
                        "Stored garden is newer than this build, unknown fields will be dropped"
                    ),
                    Some(_) => {}
                    None => tracing::warn!(
                        version = ?document.get("version"),
                        "Stored garden has no usable version, reading its data as is"
                    ),
                }
                data
            }
            None => &document,
        };

        Ok(Garden::from_document(data)?)
    }

    /// Replace the stored garden.
    pub async fn save(&self, garden: &Garden) -> Result<(), StoreError> {
        let document = json!({
            "version": STORAGE_VERSION,
            "key": STORAGE_KEY,
            "data": garden.to_document()?,
        });
        self.backend.save(&document).await
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.backend.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use microgreens_core::garden::{Plot, Profile};

    use super::*;
    use crate::memory::MemoryStore;

    fn sample_garden() -> Garden {
        let mut garden = Garden::default();
        garden.add_plot(Plot { id: "A1".into(), label: "Plot A1".into() });
        garden.upsert_profile(Profile {
            id: "rukola".into(),
            name: "Rukola".into(),
            cover_days: 3,
            uncover_days: 8,
            watering_frequency_days: 1,
            notes: String::new(),
        });
        garden
    }

    #[tokio::test]
    async fn empty_backend_loads_empty_garden() {
        let store = GardenStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.load().await.unwrap(), Garden::default());
    }

    #[tokio::test]
    async fn save_writes_versioned_envelope() {
        let backend = Arc::new(MemoryStore::new());
        let store = GardenStore::new(backend.clone());

        store.save(&sample_garden()).await.unwrap();

        let doc = backend.document().await.unwrap();
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["key"], "microgreens");
        assert_eq!(doc["data"]["plots"][0]["id"], "A1");
        assert_eq!(store.load().await.unwrap(), sample_garden());
    }

    #[tokio::test]
    async fn bare_document_is_read_as_data() {
        let backend = Arc::new(MemoryStore::with_document(json!({
            "plots": [{"id": "B1", "label": "B1"}],
            "profiles": [],
            "deployments": []
        })));
        let garden = GardenStore::new(backend).load().await.unwrap();
        assert_eq!(garden.plots[0].id, "B1");
    }

    #[tokio::test]
    async fn newer_version_is_still_decoded() {
        let backend = Arc::new(MemoryStore::with_document(json!({
            "version": 7,
            "key": "microgreens",
            "data": {
                "plots": [{"id": "A1", "label": "Plot A1", "color": "green"}],
                "greenhouses": []
            }
        })));
        let garden = GardenStore::new(backend).load().await.unwrap();
        assert_eq!(garden.plots.len(), 1);
    }

    #[tokio::test]
    async fn envelope_without_version_keeps_its_data() {
        let backend = Arc::new(MemoryStore::with_document(json!({
            "key": "microgreens",
            "data": {"plots": [{"id": "C2", "label": "C2"}], "profiles": [], "deployments": []}
        })));
        let garden = GardenStore::new(backend).load().await.unwrap();
        assert_eq!(garden.plots.len(), 1);
        assert_eq!(garden.plots[0].id, "C2");
    }

    #[tokio::test]
    async fn envelope_with_string_version_keeps_its_data() {
        let backend = Arc::new(MemoryStore::with_document(json!({
            "version": "1",
            "key": "microgreens",
            "data": {"plots": [{"id": "C3", "label": "C3"}], "profiles": [], "deployments": []}
        })));
        let garden = GardenStore::new(backend).load().await.unwrap();
        assert_eq!(garden.plots[0].id, "C3");
    }

    #[tokio::test]
    async fn invalid_data_is_a_document_error() {
        let backend = Arc::new(MemoryStore::with_document(json!({
            "version": 1,
            "data": {"plots": "not a list"}
        })));
        let result = GardenStore::new(backend).load().await;
        assert_matches!(result, Err(StoreError::Document(_)));
    }

    #[tokio::test]
    async fn scalar_data_is_a_document_error() {
        let backend = Arc::new(MemoryStore::with_document(json!({"key": "microgreens", "data": 5})));
        let result = GardenStore::new(backend).load().await;
        assert_matches!(result, Err(StoreError::Document(_)));
    }

    #[tokio::test]
    async fn failed_save_propagates() {
        let backend = Arc::new(MemoryStore::new());
        backend.set_fail_saves(true);
        let store = GardenStore::new(backend.clone());

        assert_matches!(store.save(&sample_garden()).await, Err(StoreError::Unavailable(_)));
        assert!(backend.document().await.is_none());
    }
}
