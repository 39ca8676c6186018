//! The persisted translation file.
//!
//! Layout: `{ "<key>": { "<lang>": "<string>", ... }, ... }`, pretty-printed
//! with 2-space indentation in insertion order.

use std::{
    collections::HashSet,
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Language code to translated string for one key.
pub type TranslationEntry = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read translation file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse translation file: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Root of translation file must be an object: {}", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("Failed to write translation file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// New entries to merge into a store, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationPatch {
    entries: Map<String, Value>,
}

impl TranslationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one language value, creating the key's entry if needed.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        lang: impl Into<String>,
        value: impl Into<String>,
    ) {
        let entry = self
            .entries
            .entry(key.into())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(lang.into(), Value::String(value.into()));
        }
    }

    /// Set a key's whole entry, replacing anything staged for it.
    pub fn insert_entry(&mut self, key: impl Into<String>, entry: TranslationEntry) {
        self.entries.insert(key.into(), Value::Object(entry));
    }

    pub fn get(&self, key: &str, lang: &str) -> Option<&str> {
        self.entries.get(key)?.get(lang)?.as_str()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts of what a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub added: usize,
    pub replaced: usize,
}

/// In-memory view of a translation file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationStore {
    data: Map<String, Value>,
}

impl TranslationStore {
    /// Load a store from disk.
    ///
    /// A missing file is an empty store. Any other read failure, or content
    /// that is not a JSON object, is an error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(Self::default())
            }
            Err(source) => Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse store content. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Every key with an entry, regardless of which languages it covers.
    pub fn keys(&self) -> HashSet<String> {
        self.data.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.data.get(key)?.as_object()
    }

    pub fn get(&self, key: &str, lang: &str) -> Option<&str> {
        self.entry(key)?.get(lang)?.as_str()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrite each patched key's entry as a whole.
    ///
    /// Existing keys keep their position; new keys are appended in patch order.
    pub fn apply(&mut self, patch: &TranslationPatch) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for (key, value) in &patch.entries {
            match self.data.insert(key.clone(), value.clone()) {
                Some(_) => summary.replaced += 1,
                None => summary.added += 1,
            }
        }
        summary
    }

    pub fn to_json_pretty(&self) -> String {
        // A map of JSON values always serializes.
        let content = serde_json::to_string_pretty(&self.data).unwrap_or_default();
        format!("{}\n", content)
    }

    /// Write the store to `path` through a temporary file and a rename, so a
    /// failed write never leaves a half-written store behind.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
        temp.write_all(self.to_json_pretty().as_bytes())
            .map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;

        Ok(())
    }

    /// Load the current file, overwrite the patched keys, and write it back.
    ///
    /// Last writer wins per key. There is no locking; callers serialize
    /// merges for a given path.
    pub fn merge(path: &Path, patch: &TranslationPatch) -> Result<MergeSummary, StoreError> {
        let mut store = Self::load(path)?;
        let summary = store.apply(patch);
        store.save(path)?;
        tracing::debug!(
            path = %path.display(),
            added = summary.added,
            replaced = summary.replaced,
            "merged translations"
        );
        Ok(summary)
    }
}
