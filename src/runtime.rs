//! Runtime lookup of translated strings.
//!
//! A [`Catalog`] holds one or more modules of translations (each the shape
//! of a translation file) and resolves `(key, lang)` to a string. A key with
//! no usable value resolves to itself and is remembered in
//! [`Catalog::missing`], which is what the scanner would later report as
//! untranslated.
//!
//! ```ignore
//! let store = TranslationStore::load(Path::new("locales/translation.json"))?;
//! let catalog = Catalog::new("zh-CN", store);
//! let text = catalog.t("欢迎 {name}", Some("en"), &[("name", "Ada")]);
//! ```

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

use regex::{Captures, Regex};

use crate::core::TranslationStore;

pub const DEFAULT_MODULE: &str = "default";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

#[derive(Debug)]
pub struct Catalog {
    default_lang: String,
    modules: HashMap<String, TranslationStore>,
    missing: Mutex<Vec<String>>,
}

impl Catalog {
    /// Create a catalog whose `default` module is `store`.
    pub fn new(default_lang: impl Into<String>, store: TranslationStore) -> Self {
        let mut modules = HashMap::new();
        modules.insert(DEFAULT_MODULE.to_string(), store);
        Self {
            default_lang: default_lang.into(),
            modules,
            missing: Mutex::new(Vec::new()),
        }
    }

    /// Add (or replace) a named module.
    pub fn with_module(mut self, name: impl Into<String>, store: TranslationStore) -> Self {
        self.modules.insert(name.into(), store);
        self
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// Resolve `key` in the `default` module.
    ///
    /// `lang` falls back to the catalog's default language.
    pub fn t(&self, key: &str, lang: Option<&str>, vars: &[(&str, &str)]) -> String {
        self.t_in(DEFAULT_MODULE, key, lang, vars)
    }

    /// Resolve `key` in `module`.
    pub fn t_in(
        &self,
        module: &str,
        key: &str,
        lang: Option<&str>,
        vars: &[(&str, &str)],
    ) -> String {
        let lang = lang.unwrap_or(&self.default_lang);
        let value = self
            .modules
            .get(module)
            .and_then(|store| store.get(key, lang))
            .filter(|value| !value.is_empty());

        match value {
            Some(value) => interpolate(value, vars),
            None => {
                self.record_missing(key);
                key.to_string()
            }
        }
    }

    /// Keys that could not be resolved so far, in first-seen order.
    pub fn missing(&self) -> Vec<String> {
        self.missing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record_missing(&self, key: &str) {
        let mut missing = self
            .missing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !missing.iter().any(|k| k == key) {
            tracing::debug!(key, "untranslated key");
            missing.push(key.to_string());
        }
    }
}

/// Replace `{name}` with the matching variable. Unknown names stay as written.
fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    if vars.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
