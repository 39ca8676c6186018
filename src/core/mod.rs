//! Core engine: scanning, reconciliation and batch translation.
//!
//! ## Pipeline
//!
//! 1. **Scan**: `file_scanner` walks the workspace and `extract` finds marked
//!    calls, with `position` resolving offsets to line/column.
//! 2. **Reconcile**: `status` splits occurrences into translated and
//!    untranslated against the keys of the `store`.
//! 3. **Translate**: `batch` fills untranslated keys for every target
//!    language and merges the result back into the `store`.

pub mod batch;
pub mod extract;
pub mod file_scanner;
mod occurrence;
pub mod position;
pub mod status;
pub mod store;

pub use batch::{
    BatchError, BatchOutcome, BatchTranslator, CancelToken, NoProgress, PairFailure, Progress,
};
pub use extract::KeyExtractor;
pub use file_scanner::{ScanOptions, WorkspaceScan, is_excluded, scan_file, scan_workspace};
pub use occurrence::{KeyOccurrence, ScanWarning};
pub use position::{LineIndex, Position};
pub use status::{ScanResult, StatusReport, file_status, reconcile, workspace_status};
pub use store::{MergeSummary, StoreError, TranslationEntry, TranslationPatch, TranslationStore};
