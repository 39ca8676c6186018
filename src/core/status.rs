//! Translation status reconciliation.
//!
//! An occurrence is translated iff its key has an entry in the store. Which
//! languages that entry covers does not matter.

use std::{collections::HashSet, path::Path};

use crate::core::{
    KeyOccurrence, ScanOptions, ScanWarning, StoreError, TranslationStore, scan_file,
    scan_workspace,
};

/// Occurrences of one scan pass, split by translation status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub untranslated: Vec<KeyOccurrence>,
    pub translated: Vec<KeyOccurrence>,
}

impl ScanResult {
    pub fn total(&self) -> usize {
        self.untranslated.len() + self.translated.len()
    }

    /// Distinct untranslated keys in first-seen order. This is the batch input.
    pub fn untranslated_keys(&self) -> Vec<String> {
        unique_keys(&self.untranslated)
    }

    /// Distinct keys of each partition, `(untranslated, translated)`.
    pub fn unique_keys(&self) -> (Vec<String>, Vec<String>) {
        (unique_keys(&self.untranslated), unique_keys(&self.translated))
    }
}

/// Partition occurrences by membership of their key in `known_keys`.
///
/// Relative order is preserved within each partition.
pub fn reconcile(occurrences: &[KeyOccurrence], known_keys: &HashSet<String>) -> ScanResult {
    let (translated, untranslated): (Vec<_>, Vec<_>) = occurrences
        .iter()
        .cloned()
        .partition(|o| known_keys.contains(&o.key));

    ScanResult {
        untranslated,
        translated,
    }
}

/// Status of a scan together with the files that could not be read.
#[derive(Debug, Default)]
pub struct StatusReport {
    pub result: ScanResult,
    pub warnings: Vec<ScanWarning>,
    pub files_scanned: usize,
    pub store_keys: usize,
}

/// Scan `root` and reconcile the findings against the store at `store_path`.
pub fn workspace_status(
    root: &Path,
    store_path: &Path,
    options: &ScanOptions,
) -> Result<StatusReport, StoreError> {
    let store = TranslationStore::load(store_path)?;
    let scan = scan_workspace(root, options);

    Ok(StatusReport {
        result: reconcile(&scan.occurrences, &store.keys()),
        warnings: scan.warnings,
        files_scanned: scan.files_scanned,
        store_keys: store.len(),
    })
}

/// Same as [`workspace_status`] for a single file.
pub fn file_status(
    file: &Path,
    store_path: &Path,
    options: &ScanOptions,
) -> Result<StatusReport, StoreError> {
    let store = TranslationStore::load(store_path)?;
    let scan = scan_file(file, options);

    Ok(StatusReport {
        result: reconcile(&scan.occurrences, &store.keys()),
        warnings: scan.warnings,
        files_scanned: scan.files_scanned,
        store_keys: store.len(),
    })
}

fn unique_keys(occurrences: &[KeyOccurrence]) -> Vec<String> {
    let mut seen = HashSet::new();
    occurrences
        .iter()
        .filter(|o| seen.insert(o.key.as_str()))
        .map(|o| o.key.clone())
        .collect()
}
