//! Keyfill - translation-key scanner and auto-filler
//!
//! Keyfill finds `$t('...')` call sites in a front-end workspace, reports
//! which keys are missing from the translation file, and fills them in
//! through a machine translation backend.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, reconciliation, store and batch translation
//! - `runtime`: Key lookup with interpolation for application code
//! - `translate`: Translation backends

pub mod cli;
pub mod config;
pub mod core;
pub mod runtime;
pub mod translate;
