//! Translation store: resolves lookup keys to localized strings.
//!
//! Resolution never fails. A key that is absent from the table (or mapped to
//! an empty string) comes back unchanged, so untranslated UI shows the raw
//! key instead of nothing. Misses are counted and, when enabled, logged at
//! `debug` so they can be found without changing what callers see.

use crate::error::I18nError;
use crate::i18n::params::{interpolate, Params};
use crate::i18n::{I18nMetrics, Language, TranslationTable};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub struct TranslationStore {
    tables: HashMap<Language, TranslationTable>,
    metrics: I18nMetrics,
    log_missing_keys: bool,
}

impl TranslationStore {
    /// Build a store from explicit tables.
    ///
    /// Every supported language needs a table; a later table for the same
    /// language replaces an earlier one.
    pub fn from_tables<I>(tables: I) -> Result<Self, I18nError>
    where
        I: IntoIterator<Item = (Language, TranslationTable)>,
    {
        let tables: HashMap<Language, TranslationTable> = tables.into_iter().collect();

        if let Some(missing) = Language::all()
            .into_iter()
            .find(|lang| !tables.contains_key(lang))
        {
            return Err(I18nError::MissingTable(missing.code()));
        }

        Ok(Self {
            tables,
            metrics: I18nMetrics::new(),
            log_missing_keys: true,
        })
    }

    /// Build a store from the tables compiled into the binary.
    pub fn embedded() -> Result<Self, I18nError> {
        let tables = Language::all()
            .into_iter()
            .map(|lang| TranslationTable::embedded(lang).map(|table| (lang, table)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tables(tables)
    }

    /// Load `<dir>/<code>.json` for every supported language.
    pub fn from_dir(dir: &Path) -> Result<Self, I18nError> {
        let tables = Language::all()
            .into_iter()
            .map(|lang| TranslationTable::load_file(dir, lang).map(|table| (lang, table)))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Loaded {} translation tables from {}",
            tables.len(),
            dir.display()
        );
        Self::from_tables(tables)
    }

    /// Enable or disable `debug` logging of missing keys.
    pub fn with_missing_key_logging(mut self, enabled: bool) -> Self {
        self.log_missing_keys = enabled;
        self
    }

    /// Resolve `key` for `language`, falling back to `key` itself.
    pub fn resolve(&self, language: Language, key: &str) -> String {
        self.resolve_with(language, key, &Params::new())
    }

    /// Resolve `key` and substitute `{name}` placeholders from `params`.
    ///
    /// Params are not applied to the fallback: a missing key is returned
    /// exactly as given.
    pub fn resolve_with(&self, language: Language, key: &str, params: &Params) -> String {
        match self.lookup(language, key) {
            Some(template) => {
                self.metrics.record_hit();
                interpolate(template, params)
            }
            None => {
                self.metrics.record_miss();
                if self.log_missing_keys {
                    debug!("Missing translation key '{}' for {}", key, language);
                }
                key.to_string()
            }
        }
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)?
            .get(key)
            .filter(|value| !value.is_empty())
    }

    /// Whether `key` has a non-empty translation for `language`.
    pub fn has_key(&self, language: Language, key: &str) -> bool {
        self.lookup(language, key).is_some()
    }

    /// The supported languages, in registration order.
    pub fn supported_languages(&self) -> Vec<Language> {
        Language::all()
    }

    pub fn table(&self, language: Language) -> Option<&TranslationTable> {
        self.tables.get(&language)
    }

    pub fn metrics(&self) -> &I18nMetrics {
        &self.metrics
    }

    /// A translator bound to `language`.
    pub fn translator(&self, language: Language) -> Translator<'_> {
        Translator {
            store: self,
            language,
        }
    }
}

/// A store paired with one language.
///
/// Observers and consumers receive a `Translator` instead of the controller,
/// so refreshing a snapshot never needs to borrow the controller again.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    store: &'a TranslationStore,
    language: Language,
}

impl<'a> Translator<'a> {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t(&self, key: &str) -> String {
        self.store.resolve(self.language, key)
    }

    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.store.resolve_with(self.language, key, params)
    }

    pub fn store(&self) -> &'a TranslationStore {
        self.store
    }
}

impl std::fmt::Debug for Translator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language)
            .finish()
    }
}
