use std::fmt;

/// One appearance of a translation key in source text.
///
/// Created fresh on every scan; positions are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyOccurrence {
    pub key: String,
    pub file_path: String,
    pub line: usize,
    pub character: usize,
}

impl KeyOccurrence {
    pub fn new(
        key: impl Into<String>,
        file_path: impl Into<String>,
        line: usize,
        character: usize,
    ) -> Self {
        Self {
            key: key.into(),
            file_path: file_path.into(),
            line,
            character,
        }
    }
}

impl fmt::Display for KeyOccurrence {
    /// Editor-style `path:line:col` with 1-based numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path,
            self.line + 1,
            self.character + 1
        )
    }
}

/// A file that could not be scanned.
///
/// Scan failures never abort a pass; they are collected and handed back to
/// the caller alongside the occurrences that were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub file_path: String,
    pub error: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_path, self.error)
    }
}
