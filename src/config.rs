use crate::i18n::{Language, TranslationStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    // Durable storage
    pub storage_path: PathBuf,

    // Translation tables (embedded tables when unset)
    pub locales_dir: Option<PathBuf>,

    // Language
    pub default_language: Language,

    // Diagnostics
    pub log_missing_keys: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            storage_path: std::env::var("STUDIO_I18N_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/storage.json")),

            locales_dir: std::env::var("STUDIO_I18N_LOCALES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            default_language: match std::env::var("STUDIO_I18N_DEFAULT_LANGUAGE") {
                Ok(code) => Language::from_code(&code)
                    .context("STUDIO_I18N_DEFAULT_LANGUAGE is not a supported language")?,
                Err(_) => Language::default_language(),
            },

            log_missing_keys: std::env::var("STUDIO_I18N_LOG_MISSING_KEYS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        })
    }

    /// Load the translation store this configuration describes.
    pub fn build_store(&self) -> Result<TranslationStore> {
        let store = match &self.locales_dir {
            Some(dir) => TranslationStore::from_dir(dir)
                .with_context(|| format!("Failed to load locales from {}", dir.display()))?,
            None => {
                info!("Using embedded translation tables");
                TranslationStore::embedded().context("Failed to load embedded locales")?
            }
        };
        Ok(store.with_missing_key_logging(self.log_missing_keys))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
