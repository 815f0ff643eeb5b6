//! Language toggle: the switch button embedded in pages.
//!
//! The button shows the short label of the language a click would switch to
//! ("EN" while Chinese is active, "中文" while English is active). Clicking
//! cycles to the next language in registration order through
//! `LanguageController::set_language`, which persists the choice and fans
//! out to chrome and every mounted page, other toggles included.

use crate::i18n::{Language, LanguageController, Subscription};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

pub struct LanguageToggle {
    label: Arc<Mutex<&'static str>>,
    _subscription: Subscription,
}

fn label_for(active: Language) -> &'static str {
    active.next().short_label()
}

impl LanguageToggle {
    pub fn mount(controller: &LanguageController) -> Self {
        let label = Arc::new(Mutex::new(label_for(controller.language())));

        let handler_label = Arc::clone(&label);
        let subscription = controller.subscribe(move |translator| {
            *handler_label.lock().unwrap_or_else(PoisonError::into_inner) =
                label_for(translator.language());
        });

        Self {
            label,
            _subscription: subscription,
        }
    }

    /// Text currently shown on the button.
    pub fn label(&self) -> &'static str {
        *self.label.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch to the next language.
    ///
    /// Returns the result of `set_language`.
    pub fn switch(&self, controller: &mut LanguageController) -> bool {
        let current = controller.language();
        let target = current.next();
        info!("Language toggle clicked: {} -> {}", current, target);
        controller.set_language(target.code())
    }
}

impl std::fmt::Debug for LanguageToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageToggle")
            .field("label", &self.label())
            .finish()
    }
}
