//! Translation tables: flat key -> string maps, one per language.
//!
//! Tables are JSON objects whose values are all strings. They are loaded
//! wholesale and never edited afterwards; there is no mutating API.

use crate::error::I18nError;
use crate::i18n::Language;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tables compiled into the binary, keyed by language code.
const EMBEDDED_TABLES: &[(&str, &str)] = &[
    ("zh-CN", include_str!("../../locales/zh-CN.json")),
    ("en", include_str!("../../locales/en.json")),
];

/// An immutable key -> localized string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Parse a table from a JSON object of strings.
    ///
    /// `language` only labels the error; it is not validated here.
    pub fn from_json_str(language: &str, json: &str) -> Result<Self, I18nError> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|source| I18nError::TableParse {
                language: language.to_string(),
                source,
            })?;
        Ok(Self { entries })
    }

    /// Load `<dir>/<code>.json` for `language`.
    pub fn load_file(dir: &Path, language: Language) -> Result<Self, I18nError> {
        let path = dir.join(format!("{}.json", language.code()));
        let json = fs::read_to_string(&path).map_err(|source| I18nError::TableIo {
            path: path.clone(),
            source,
        })?;
        Self::from_json_str(language.code(), &json)
    }

    /// The table compiled into the binary for `language`.
    pub fn embedded(language: Language) -> Result<Self, I18nError> {
        let json = EMBEDDED_TABLES
            .iter()
            .find(|(code, _)| *code == language.code())
            .map(|(_, json)| *json)
            .ok_or(I18nError::MissingTable(language.code()))?;
        Self::from_json_str(language.code(), json)
    }

    /// Raw value for `key`, including empty strings.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
