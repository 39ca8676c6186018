use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
    config::Config,
    core::{KeyExtractor, KeyOccurrence, ScanWarning},
};

/// What to scan and what to leave out.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extractor: KeyExtractor,
    /// Directory names excluded anywhere below the root (exact segment match).
    pub exclude_dirs: HashSet<String>,
    /// Glob patterns matched against the path relative to the root.
    pub ignores: Vec<Pattern>,
}

impl ScanOptions {
    pub fn new(extractor: KeyExtractor) -> Self {
        Self {
            extractor,
            exclude_dirs: HashSet::new(),
            ignores: Vec::new(),
        }
    }

    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = KeyExtractor::new(&config.marker)
            .with_context(|| format!("Invalid translation marker: \"{}\"", config.marker))?
            .with_extensions(&config.extensions);

        let ignores = config
            .ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extractor,
            exclude_dirs: config.exclude_dirs.iter().cloned().collect(),
            ignores,
        })
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(KeyExtractor::default())
    }
}

/// Output of one scan pass.
#[derive(Debug, Default)]
pub struct WorkspaceScan {
    /// Occurrences of all files, concatenated in enumeration order.
    pub occurrences: Vec<KeyOccurrence>,
    /// Paths that could not be visited or read.
    pub warnings: Vec<ScanWarning>,
    pub files_scanned: usize,
}

/// Scan every eligible file under `root`.
///
/// Enumeration is sorted by file name so a single run is stable. Symlinks are
/// followed; loops are reported as warnings and each real file is visited at
/// most once.
pub fn scan_workspace(root: &Path, options: &ScanOptions) -> WorkspaceScan {
    let (files, mut warnings) = collect_files(root, options);
    tracing::debug!(root = %root.display(), files = files.len(), "collected source files");

    // Reads run in parallel; collect keeps enumeration order.
    let results: Vec<_> = files
        .par_iter()
        .map(|path| options.extractor.extract_file(path))
        .collect();

    let mut occurrences = Vec::new();
    for result in results {
        match result {
            Ok(found) => occurrences.extend(found),
            Err(warning) => {
                tracing::warn!(file = %warning.file_path, error = %warning.error, "skipping file");
                warnings.push(warning);
            }
        }
    }

    WorkspaceScan {
        occurrences,
        warnings,
        files_scanned: files.len(),
    }
}

/// Scan a single file, applying only the extension filter.
pub fn scan_file(path: &Path, options: &ScanOptions) -> WorkspaceScan {
    if !options.extractor.is_scannable(path) {
        return WorkspaceScan::default();
    }

    match options.extractor.extract_file(path) {
        Ok(occurrences) => WorkspaceScan {
            occurrences,
            warnings: Vec::new(),
            files_scanned: 1,
        },
        Err(warning) => {
            tracing::warn!(file = %warning.file_path, error = %warning.error, "skipping file");
            WorkspaceScan {
                occurrences: Vec::new(),
                warnings: vec![warning],
                files_scanned: 0,
            }
        }
    }
}

/// Check whether any directory segment of `path` relative to `root` is excluded.
///
/// Only whole segments count: `dist` excludes `dist/app.js` but not
/// `distribution/app.js`.
pub fn is_excluded(root: &Path, path: &Path, exclude_dirs: &HashSet<String>) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    let dir = if path.is_dir() { Some(rel) } else { rel.parent() };

    dir.into_iter()
        .flat_map(|d| d.components())
        .any(|c| match c {
            Component::Normal(segment) => segment
                .to_str()
                .is_some_and(|s| exclude_dirs.contains(s)),
            _ => false,
        })
}

fn collect_files(root: &Path, options: &ScanOptions) -> (Vec<PathBuf>, Vec<ScanWarning>) {
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_excluded(root, entry.path(), &options.exclude_dirs)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let file_path = e
                    .path()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| root.to_string_lossy().to_string());
                let error = if e.loop_ancestor().is_some() {
                    "Symlink cycle detected, skipping".to_string()
                } else {
                    format!("Cannot access path: {}", e)
                };
                tracing::warn!(path = %file_path, %error, "skipping path");
                warnings.push(ScanWarning { file_path, error });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !options.extractor.is_scannable(path) {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(root)
            && options.ignores.iter().any(|p| p.matches_path(rel))
        {
            continue;
        }

        // The same file can be reachable through several symlinks.
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if seen.insert(canonical) {
            files.push(path.to_path_buf());
        }
    }

    (files, warnings)
}
