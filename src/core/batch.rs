//! Batch translation of untranslated keys.
//!
//! Every (key, language) pair is one translator call, made sequentially.
//! A failing pair is recorded as an empty string and never stops the batch.
//! Cancellation is observed between keys; a cancelled batch writes nothing.

use std::{
    collections::HashSet,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    core::{MergeSummary, StoreError, TranslationEntry, TranslationPatch, TranslationStore},
    translate::Translator,
};

/// Cooperative cancellation flag shared between a batch and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Receives `(processed, total)` after each key completes.
pub trait Progress {
    fn report(&mut self, processed: usize, total: usize);
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn report(&mut self, processed: usize, total: usize) {
        self(processed, total)
    }
}

/// Progress sink that ignores all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _processed: usize, _total: usize) {}
}

/// One (key, language) translation that failed and was stored as `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFailure {
    pub key: String,
    pub lang: String,
    pub error: String,
}

#[derive(Debug)]
pub enum BatchOutcome {
    /// All keys were processed and merged into the store.
    Completed {
        patch: TranslationPatch,
        failures: Vec<PairFailure>,
        merge: MergeSummary,
    },
    /// Stopped at a key boundary; nothing was persisted.
    Cancelled { processed: usize, total: usize },
}

#[derive(Debug, Error)]
pub enum BatchError {
    /// Translations finished but could not be saved. `patch` holds the
    /// complete result so the merge can be retried.
    #[error("Failed to save {} translated key(s)", .pending.len())]
    Persist {
        pending: Vec<String>,
        patch: TranslationPatch,
        #[source]
        source: StoreError,
    },
}

/// Translates a batch of keys into several target languages.
pub struct BatchTranslator<'a> {
    translator: &'a dyn Translator,
    source_lang: String,
    target_langs: Vec<String>,
}

impl<'a> BatchTranslator<'a> {
    pub fn new<I, S>(
        translator: &'a dyn Translator,
        source_lang: impl Into<String>,
        target_langs: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            translator,
            source_lang: source_lang.into(),
            target_langs: dedup(target_langs.into_iter().map(Into::into)),
        }
    }

    pub fn target_langs(&self) -> &[String] {
        &self.target_langs
    }

    /// Translate `keys` and merge the results into the store at `store_path`.
    ///
    /// Duplicate keys are translated once. The merge is a single call
    /// covering exactly the processed keys and only happens when the batch was
    /// not cancelled. An empty batch does not touch the store.
    pub async fn run(
        &self,
        keys: &[String],
        cancel: &CancelToken,
        progress: &mut dyn Progress,
        store_path: &Path,
    ) -> Result<BatchOutcome, BatchError> {
        let keys = dedup(keys.iter().cloned());
        let total = keys.len();
        tracing::info!(
            keys = total,
            langs = self.target_langs.len(),
            provider = self.translator.provider_name(),
            "starting translation batch"
        );

        let mut patch = TranslationPatch::new();
        let mut failures = Vec::new();

        for (index, key) in keys.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(processed = index, total, "translation batch cancelled");
                return Ok(BatchOutcome::Cancelled {
                    processed: index,
                    total,
                });
            }

            let entry = self.translate_key(key, &mut failures).await;
            patch.insert_entry(key.clone(), entry);
            progress.report(index + 1, total);
        }

        // Requested while the last key was in flight.
        if cancel.is_cancelled() {
            tracing::info!(processed = total, total, "translation batch cancelled");
            return Ok(BatchOutcome::Cancelled {
                processed: total,
                total,
            });
        }

        if patch.is_empty() {
            return Ok(BatchOutcome::Completed {
                patch,
                failures,
                merge: MergeSummary::default(),
            });
        }

        match TranslationStore::merge(store_path, &patch) {
            Ok(merge) => {
                tracing::info!(
                    added = merge.added,
                    replaced = merge.replaced,
                    failed_pairs = failures.len(),
                    "translation batch saved"
                );
                Ok(BatchOutcome::Completed {
                    patch,
                    failures,
                    merge,
                })
            }
            Err(source) => Err(BatchError::Persist {
                pending: patch.keys().map(String::from).collect(),
                patch,
                source,
            }),
        }
    }

    async fn translate_key(&self, key: &str, failures: &mut Vec<PairFailure>) -> TranslationEntry {
        let mut entry = Map::new();
        for lang in &self.target_langs {
            let value = match self.translator.translate(key, &self.source_lang, lang).await {
                Ok(text) => {
                    tracing::debug!(key, lang = %lang, "translated");
                    text
                }
                Err(err) => {
                    tracing::warn!(key, lang = %lang, error = %err, "translation failed");
                    failures.push(PairFailure {
                        key: key.to_string(),
                        lang: lang.clone(),
                        error: err.to_string(),
                    });
                    String::new()
                }
            };
            entry.insert(lang.clone(), Value::String(value));
        }
        entry
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
