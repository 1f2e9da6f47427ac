//! Favorite properties, persisted through an injected key-value store.

use crate::error::{CatalogError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, error};

pub const FAVORITES_KEY: &str = "property-favorites";

/// Minimal string store, the shape of browser local storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;
}

/// Process-local store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CatalogError::Storage("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CatalogError::Storage("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CatalogError::Storage("memory store lock poisoned".to_string()))?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Store backed by a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(CatalogError::Storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json).map_err(|err| {
            CatalogError::Storage(format!("failed to write {}: {}", self.path.display(), err))
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }
}

/// Favorite property ids.
///
/// Storage failures are logged and otherwise ignored: the in-memory list
/// stays authoritative for the session.
pub struct Favorites<S: KeyValueStore> {
    store: S,
    ids: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn load(store: S) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|err| {
                error!("Error loading favorites: {}", err);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                error!("Error loading favorites: {}", err);
                Vec::new()
            }
        };

        debug!("Loaded {} favorites", ids.len());
        Self { store, ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_favorite(&self, property_id: &str) -> bool {
        self.ids.iter().any(|id| id == property_id)
    }

    /// Add or remove `property_id`; returns whether it is now a favorite
    pub fn toggle(&mut self, property_id: &str) -> bool {
        let now_favorite = if self.is_favorite(property_id) {
            self.ids.retain(|id| id != property_id);
            false
        } else {
            self.ids.push(property_id.to_string());
            true
        };

        self.persist();
        now_favorite
    }

    /// Expressing interest always leaves the property in the favorites
    pub fn express_interest(&mut self, property_id: &str) -> bool {
        if !self.is_favorite(property_id) {
            self.toggle(property_id);
        }
        self.is_favorite(property_id)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.ids)
            .map_err(CatalogError::from)
            .and_then(|json| self.store.set(FAVORITES_KEY, &json));

        if let Err(err) = result {
            error!("Error saving favorites: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(CatalogError::Storage("unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(CatalogError::Storage("unavailable".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::load(MemoryStore::new());

        assert!(favorites.toggle("p1"));
        assert!(favorites.is_favorite("p1"));
        assert!(!favorites.toggle("p1"));
        assert!(!favorites.is_favorite("p1"));
    }

    #[test]
    fn toggles_are_persisted() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.toggle("p1");
        favorites.toggle("p2");

        let store = favorites.into_store();
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["p1","p2"]"#));

        let reloaded = Favorites::load(store);
        assert_eq!(reloaded.ids(), ["p1", "p2"]);
    }

    #[test]
    fn express_interest_is_idempotent() {
        let mut favorites = Favorites::load(MemoryStore::new());

        assert!(favorites.express_interest("p1"));
        assert!(favorites.express_interest("p1"));
        assert_eq!(favorites.ids(), ["p1"]);
    }

    #[test]
    fn corrupt_payload_starts_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();

        let favorites = Favorites::load(store);
        assert!(favorites.ids().is_empty());
    }

    #[test]
    fn storage_failures_are_absorbed() {
        let mut favorites = Favorites::load(BrokenStore);

        assert!(favorites.toggle("p1"));
        assert!(favorites.is_favorite("p1"));
    }

    #[test]
    fn json_file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut favorites = Favorites::load(JsonFileStore::new(&path));
        favorites.toggle("6b66b77c");

        let reloaded = Favorites::load(JsonFileStore::new(&path));
        assert!(reloaded.is_favorite("6b66b77c"));
        assert_eq!(JsonFileStore::new(&path).keys().unwrap(), vec![FAVORITES_KEY]);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
    }
}
