//! Selectable labels for the `type` field.
//!
//! The label set is open: the defaults are always offered, and labels a user adds are
//! persisted through a [`LabelStore`] under a storage key so later sessions offer them too.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

/// Labels offered before the user adds any.
pub const DEFAULT_TYPES: [&str; 4] = ["Book", "Article", "Video", "Course"];

/// Key the user-added labels are stored under.
pub const TYPES_STORAGE_KEY: &str = "resourceTypes";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("Type label cannot be empty")]
    Empty,
}

/// Key-value persistence for user-added labels.
pub trait LabelStore: Send + Sync {
    fn load(&self, key: &str) -> Vec<String>;
    fn save(&self, key: &str, labels: &[String]);
}

/// Process-local [`LabelStore`].
#[derive(Debug, Default)]
pub struct MemoryLabelStore {
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryLabelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelStore for MemoryLabelStore {
    fn load(&self, key: &str) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn save(&self, key: &str, labels: &[String]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), labels.to_vec());
        }
    }
}

/// [`LabelStore`] kept in a JSON file shaped `{ "<storage key>": ["label", ...] }`.
///
/// Every call reads the file again, so separate processes sharing a path see each
/// other's labels. A missing file reads as empty. An unreadable one is logged and also
/// reads as empty; the next save replaces it.
#[derive(Debug, Clone)]
pub struct JsonFileLabelStore {
    path: PathBuf,
}

impl JsonFileLabelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, Vec<String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read label file");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring malformed label file");
            BTreeMap::new()
        })
    }
}

impl LabelStore for JsonFileLabelStore {
    fn load(&self, key: &str) -> Vec<String> {
        self.read_all().remove(key).unwrap_or_default()
    }

    fn save(&self, key: &str, labels: &[String]) {
        let mut all = self.read_all();
        all.insert(key.to_string(), labels.to_vec());

        let json = match serde_json::to_string_pretty(&all) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode labels");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "Failed to write label file");
        }
    }
}

/// The option list behind the `type` dropdown: defaults first, then user-added labels
/// in the order they were added.
#[derive(Clone)]
pub struct TypeOptions {
    storage_key: String,
    defaults: Vec<String>,
    custom: Vec<String>,
    store: Arc<dyn LabelStore>,
}

impl TypeOptions {
    /// Options with [`DEFAULT_TYPES`] stored under [`TYPES_STORAGE_KEY`].
    pub fn new(store: Arc<dyn LabelStore>) -> Self {
        Self::with_defaults(store, TYPES_STORAGE_KEY, DEFAULT_TYPES)
    }

    pub fn with_defaults<I, S>(store: Arc<dyn LabelStore>, storage_key: &str, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let defaults: Vec<String> = defaults.into_iter().map(Into::into).collect();
        let mut options = Self {
            storage_key: storage_key.to_string(),
            defaults,
            custom: Vec::new(),
            store,
        };
        for label in options.store.load(storage_key) {
            let label = label.trim().to_string();
            if !label.is_empty() && !options.contains(&label) {
                options.custom.push(label);
            }
        }
        options
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn options(&self) -> Vec<String> {
        self.defaults.iter().chain(&self.custom).cloned().collect()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, label: &str) -> bool {
        self.defaults
            .iter()
            .chain(&self.custom)
            .any(|known| known.eq_ignore_ascii_case(label.trim()))
    }

    /// Adds a user label and persists the custom list.
    ///
    /// Returns `Ok(false)` when the label is already offered.
    pub fn add(&mut self, label: &str) -> Result<bool, LabelError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(LabelError::Empty);
        }
        if self.contains(label) {
            return Ok(false);
        }
        self.custom.push(label.to_string());
        self.store.save(&self.storage_key, &self.custom);
        debug!(label, key = %self.storage_key, "Type label added");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_first() {
        let options = TypeOptions::new(Arc::new(MemoryLabelStore::new()));
        assert_eq!(options.options(), vec!["Book", "Article", "Video", "Course"]);
        assert_eq!(options.storage_key(), "resourceTypes");
    }

    #[test]
    fn test_added_labels_persist_across_instances() {
        let store: Arc<dyn LabelStore> = Arc::new(MemoryLabelStore::new());
        let mut options = TypeOptions::new(store.clone());

        assert_eq!(options.add("  Podcast "), Ok(true));
        assert_eq!(options.add("podcast"), Ok(false));
        assert_eq!(options.add("book"), Ok(false));
        assert_eq!(options.add("   "), Err(LabelError::Empty));

        let reopened = TypeOptions::new(store.clone());
        assert_eq!(
            reopened.options(),
            vec!["Book", "Article", "Video", "Course", "Podcast"]
        );
        assert_eq!(store.load(TYPES_STORAGE_KEY), vec!["Podcast".to_string()]);
    }

    fn temp_label_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "resource-admin-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_file_labels_survive_reopening() {
        let path = temp_label_file("reopen");

        let mut options = TypeOptions::new(Arc::new(JsonFileLabelStore::new(&path)));
        assert_eq!(options.add("Podcast"), Ok(true));

        let reopened = TypeOptions::new(Arc::new(JsonFileLabelStore::new(&path)));
        assert_eq!(
            reopened.options(),
            vec!["Book", "Article", "Video", "Course", "Podcast"]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let path = temp_label_file("keys");
        let store = JsonFileLabelStore::new(&path);

        store.save("resourceTypes", &["Podcast".to_string()]);
        store.save("otherKey", &["Talk".to_string()]);

        assert_eq!(store.load("resourceTypes"), vec!["Podcast".to_string()]);
        assert_eq!(store.load("otherKey"), vec!["Talk".to_string()]);
        assert!(store.load("missing").is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_malformed_file_reads_empty() {
        let path = temp_label_file("broken");
        let store = JsonFileLabelStore::new(&path);
        assert!(store.load(TYPES_STORAGE_KEY).is_empty());

        std::fs::write(&path, "not json").unwrap();
        assert!(store.load(TYPES_STORAGE_KEY).is_empty());

        store.save(TYPES_STORAGE_KEY, &["Paper".to_string()]);
        assert_eq!(store.load(TYPES_STORAGE_KEY), vec!["Paper".to_string()]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_stored_duplicates_of_defaults_are_skipped() {
        let store = Arc::new(MemoryLabelStore::new());
        store.save("kinds", &["Video".to_string(), "Paper".to_string()]);

        let options = TypeOptions::with_defaults(store, "kinds", ["Video"]);
        assert_eq!(options.options(), vec!["Video", "Paper"]);
    }
}
