//! Host chrome: UI elements outside any page, such as tab bar labels.
//!
//! The controller knows nothing about chrome. The application attaches a
//! [`TabBarLabels`] as a chrome observer, which relabels the tab bar after a
//! switch has been persisted and before pages refresh.

use crate::i18n::{LanguageController, Subscription, Translator};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Lookup keys for the tab bar, by tab index.
pub const TAB_BAR_KEYS: &[&str] = &["navbar.home", "navbar.booking", "navbar.profile"];

/// Host primitive that relabels one chrome element.
pub trait HostChrome: Send {
    fn set_chrome_label(&mut self, index: usize, text: &str);
}

/// In-process tab bar. Clones share the same labels.
#[derive(Debug, Clone, Default)]
pub struct TabBar {
    labels: Arc<Mutex<Vec<String>>>,
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current labels by index.
    pub fn labels(&self) -> Vec<String> {
        self.lock().clone()
    }
}

impl HostChrome for TabBar {
    fn set_chrome_label(&mut self, index: usize, text: &str) {
        let mut labels = self.lock();
        if labels.len() <= index {
            labels.resize(index + 1, String::new());
        }
        labels[index] = text.to_string();
    }
}

/// Keeps a set of chrome labels translated.
pub struct TabBarLabels<C: HostChrome> {
    chrome: C,
    keys: Vec<String>,
}

impl<C: HostChrome> TabBarLabels<C> {
    /// Label `chrome` with [`TAB_BAR_KEYS`].
    pub fn new(chrome: C) -> Self {
        Self::with_keys(chrome, TAB_BAR_KEYS.iter().map(|k| k.to_string()).collect())
    }

    pub fn with_keys(chrome: C, keys: Vec<String>) -> Self {
        Self { chrome, keys }
    }

    /// Set every label from `translator`.
    pub fn apply(&mut self, translator: &Translator<'_>) {
        for (index, key) in self.keys.iter().enumerate() {
            let text = translator.t(key);
            self.chrome.set_chrome_label(index, &text);
        }
        debug!(
            "Applied {} chrome labels for {}",
            self.keys.len(),
            translator.language()
        );
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }
}

impl<C: HostChrome + 'static> TabBarLabels<C> {
    /// Label the chrome for the current language and keep it in sync.
    pub fn attach(mut self, controller: &LanguageController) -> Subscription {
        self.apply(&controller.translator());
        controller.subscribe_chrome(move |translator| self.apply(translator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, TranslationStore};
    use crate::storage::MemoryStorage;

    fn test_controller() -> LanguageController {
        let store = TranslationStore::embedded().expect("Embedded tables should load");
        LanguageController::new(Arc::new(store), MemoryStorage::new())
    }

    #[test]
    fn test_tab_bar_grows_on_demand() {
        let mut tab_bar = TabBar::new();
        tab_bar.set_chrome_label(2, "Profile");
        assert_eq!(tab_bar.labels(), vec!["", "", "Profile"]);
    }

    #[test]
    fn test_apply_labels_current_language() {
        let controller = test_controller();
        let tab_bar = TabBar::new();
        let mut labels = TabBarLabels::new(tab_bar.clone());

        labels.apply(&controller.translator());
        assert_eq!(tab_bar.labels(), vec!["首页", "预约", "我的"]);
    }

    #[test]
    fn test_attach_follows_switches() {
        let mut controller = test_controller();
        let tab_bar = TabBar::new();
        let _sub = TabBarLabels::new(tab_bar.clone()).attach(&controller);
        assert_eq!(tab_bar.labels(), vec!["首页", "预约", "我的"]);

        controller.set_language("en");
        assert_eq!(tab_bar.labels(), vec!["Home", "Booking", "Profile"]);
        assert_eq!(controller.language(), Language::EN);
    }

    #[test]
    fn test_detached_labels_stop_updating() {
        let mut controller = test_controller();
        let tab_bar = TabBar::new();
        let sub = TabBarLabels::new(tab_bar.clone()).attach(&controller);
        drop(sub);

        controller.set_language("en");
        assert_eq!(tab_bar.labels(), vec!["首页", "预约", "我的"]);
    }

    #[test]
    fn test_custom_keys() {
        let controller = test_controller();
        let tab_bar = TabBar::new();
        let mut labels =
            TabBarLabels::with_keys(tab_bar.clone(), vec!["app.name.short".to_string()]);
        labels.apply(&controller.translator());
        assert_eq!(tab_bar.labels(), vec!["福田石厦Home"]);
        assert_eq!(labels.chrome().labels().len(), 1);
    }
}
