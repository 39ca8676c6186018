//! Translation-call extraction from a single text buffer.
//!
//! Recognizes `<marker>(<quoted-string>, ...)` and `<marker>(<quoted-string>)`
//! where the literal uses single or double quotes. The closing quote must
//! match the opening one; escaped characters inside the literal do not end it.

use std::{borrow::Cow, fs, path::Path};

use regex::Regex;

use crate::{
    config::{DEFAULT_EXTENSIONS, DEFAULT_MARKER},
    core::{KeyOccurrence, LineIndex, ScanWarning},
};

/// Scans buffers for calls to a fixed translation marker.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    pattern: Regex,
    extensions: Vec<String>,
}

impl KeyExtractor {
    pub fn new(marker: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"{}\s*\(\s*(?:"((?:\\.|[^"\\\n])*)"|'((?:\\.|[^'\\\n])*)')\s*[,)]"#,
            regex::escape(marker)
        ))?;
        Ok(Self {
            pattern,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        })
    }

    /// Replace the set of file extensions (without the leading dot) that are
    /// eligible for scanning.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether `path` has one of the eligible extensions.
    pub fn is_scannable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == e)
            })
            .unwrap_or(false)
    }

    /// Extract every marked call in `content`, in order of appearance.
    pub fn extract(&self, content: &str, file_path: &str) -> Vec<KeyOccurrence> {
        let index = LineIndex::new(content);

        self.pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if preceded_by_identifier(content, whole.start()) {
                    return None;
                }
                let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
                let position = index.position(whole.start());
                Some(KeyOccurrence::new(
                    unescape(raw),
                    file_path,
                    position.line,
                    position.character,
                ))
            })
            .collect()
    }

    /// Read and extract one file.
    ///
    /// Files with an ineligible extension return an empty list without being
    /// read. Invalid UTF-8 is replaced rather than rejected. A read failure is
    /// returned as a [`ScanWarning`] so the caller can record it and move on.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<KeyOccurrence>, ScanWarning> {
        if !self.is_scannable(path) {
            return Ok(Vec::new());
        }

        let file_path = path.to_string_lossy();
        let bytes = fs::read(path).map_err(|e| ScanWarning {
            file_path: file_path.to_string(),
            error: format!("Failed to read file: {}", e),
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, Cow::Owned(_)) {
            tracing::debug!(file = %file_path, "replaced invalid UTF-8");
        }

        Ok(self.extract(&content, &file_path))
    }
}

impl Default for KeyExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER).expect("default marker compiles")
    }
}

fn preceded_by_identifier(content: &str, start: usize) -> bool {
    content[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Resolve backslash escapes inside a string literal body.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
