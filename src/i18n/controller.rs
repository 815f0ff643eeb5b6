//! Language controller: owns the active language.
//!
//! The controller is constructed once at startup and handed to pages and
//! components by reference. `set_language` is the only way the active
//! language changes. A successful call runs in strict program order: update
//! the in-memory state, write the durable preference, then fan out (chrome
//! observers first, then consumers).
//!
//! Nothing here escalates errors. Unsupported codes are rejected with
//! `false`, storage failures are logged and absorbed.

use crate::i18n::params::Params;
use crate::i18n::{
    I18nMetrics, Language, Phase, PropagationBridge, Subscription, TranslationStore, Translator,
};
use crate::storage::{PreferenceStorage, LANGUAGE_STORAGE_KEY};
use std::sync::Arc;
use tracing::{info, warn};

pub struct LanguageController {
    store: Arc<TranslationStore>,
    storage: Box<dyn PreferenceStorage>,
    default_language: Language,
    active: Language,
    initialized: bool,
    bridge: PropagationBridge,
}

impl LanguageController {
    /// Create a controller at the registry's default language.
    ///
    /// Call [`initialize`](Self::initialize) to pick up a persisted preference.
    pub fn new(store: Arc<TranslationStore>, storage: impl PreferenceStorage + 'static) -> Self {
        let default_language = Language::default_language();
        Self {
            store,
            storage: Box::new(storage),
            default_language,
            active: default_language,
            initialized: false,
            bridge: PropagationBridge::new(),
        }
    }

    /// Override the fallback language used when nothing valid is persisted.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self.active = language;
        self
    }

    /// Load the persisted preference, falling back to the default language.
    ///
    /// Storage is read once. Later calls return the active language as is,
    /// so they can never undo a switch whose write failed.
    pub fn initialize(&mut self) -> Language {
        if self.initialized {
            return self.active;
        }
        self.initialized = true;

        let persisted = match self.storage.get(LANGUAGE_STORAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Failed to read language preference, using {}: {}",
                    self.default_language, e
                );
                None
            }
        };

        self.active = match persisted.as_deref().map(Language::from_code) {
            Some(Ok(language)) => language,
            Some(Err(e)) => {
                warn!(
                    "Ignoring persisted language preference, using {}: {}",
                    self.default_language, e
                );
                self.default_language
            }
            None => self.default_language,
        };

        info!("Language initialized to {}", self.active);
        self.active
    }

    /// Switch to `code`.
    ///
    /// Returns `false` and leaves everything untouched when `code` is not a
    /// supported language. Otherwise updates the active language, persists
    /// it, notifies every registered observer and returns `true`, even when
    /// the storage write fails. Switching to the current language still
    /// persists and fans out.
    pub fn set_language(&mut self, code: &str) -> bool {
        let language = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                warn!("Rejected language switch: {}", e);
                self.store.metrics().record_rejected_switch();
                return false;
            }
        };

        let previous = self.active;
        self.active = language;

        if let Err(e) = self.storage.set(LANGUAGE_STORAGE_KEY, language.code()) {
            warn!("Failed to persist language preference {}: {}", language, e);
        }

        self.store.metrics().record_switch();
        info!("Language switched from {} to {}", previous, language);

        let notified = self.bridge.notify(&self.store.translator(language));
        self.store.metrics().record_notifications(notified);
        true
    }

    /// The active language.
    pub fn language(&self) -> Language {
        self.active
    }

    /// The fallback language.
    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn translate(&self, key: &str) -> String {
        self.store.resolve(self.active, key)
    }

    pub fn translate_with(&self, key: &str, params: &Params) -> String {
        self.store.resolve_with(self.active, key, params)
    }

    /// Translator bound to the active language.
    pub fn translator(&self) -> Translator<'_> {
        self.store.translator(self.active)
    }

    pub fn supported_languages(&self) -> Vec<Language> {
        self.store.supported_languages()
    }

    /// Register a page/component handler, run on every successful switch.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&Translator<'_>) + Send + 'static,
    {
        self.bridge.subscribe(Phase::Consumer, handler)
    }

    /// Register a chrome handler, run before any page/component handler.
    pub fn subscribe_chrome<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&Translator<'_>) + Send + 'static,
    {
        self.bridge.subscribe(Phase::Chrome, handler)
    }

    pub fn bridge(&self) -> &PropagationBridge {
        &self.bridge
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub fn metrics(&self) -> &I18nMetrics {
        self.store.metrics()
    }
}

impl std::fmt::Debug for LanguageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageController")
            .field("active", &self.active)
            .field("default_language", &self.default_language)
            .field("initialized", &self.initialized)
            .field("bridge", &self.bridge)
            .finish()
    }
}
