//! Consumer snapshots: a page's cached, already-translated strings.
//!
//! A page declares the strings it displays as a [`SnapshotLayout`] (slot name,
//! lookup key, optional params). Mounting captures every slot at the current
//! language and subscribes a handler that rebuilds the whole snapshot on each
//! language change. There is no incremental update and no sharing between
//! pages; each mounted instance owns its copy.

use crate::i18n::params::Params;
use crate::i18n::{Language, LanguageController, Subscription, Translator};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SlotBinding {
    slot: String,
    key: String,
    params: Params,
}

/// The strings a page or component displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotLayout {
    bindings: Vec<SlotBinding>,
}

impl SnapshotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `slot` to the translation of `key`.
    pub fn text(self, slot: impl Into<String>, key: impl Into<String>) -> Self {
        self.text_with(slot, key, Params::new())
    }

    /// Bind `slot` to the translation of `key` with placeholder values.
    pub fn text_with(
        mut self,
        slot: impl Into<String>,
        key: impl Into<String>,
        params: Params,
    ) -> Self {
        let slot = slot.into();
        let binding = SlotBinding {
            slot: slot.clone(),
            key: key.into(),
            params,
        };
        match self.bindings.iter_mut().find(|b| b.slot == slot) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
        self
    }

    /// Lookup keys in binding order.
    pub fn keys(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Translated strings plus the language they were computed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerSnapshot {
    language: Language,
    values: Vec<(String, String)>,
}

impl ConsumerSnapshot {
    /// Start declaring a layout.
    pub fn builder() -> SnapshotLayout {
        SnapshotLayout::new()
    }

    /// Translate every slot of `layout` from scratch.
    pub fn capture(layout: &SnapshotLayout, translator: &Translator<'_>) -> Self {
        let values = layout
            .bindings
            .iter()
            .map(|binding| {
                let text = if binding.params.is_empty() {
                    translator.t(&binding.key)
                } else {
                    translator.t_with(&binding.key, &binding.params)
                };
                (binding.slot.clone(), text)
            })
            .collect();

        Self {
            language: translator.language(),
            values,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, text)| text.as_str())
    }

    /// `(slot, text)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

struct ConsumerState {
    snapshot: ConsumerSnapshot,
    refreshes: usize,
}

fn lock_state(state: &Mutex<ConsumerState>) -> MutexGuard<'_, ConsumerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mounted page or component.
///
/// Dropping it (or calling [`unmount`](Self::unmount)) deregisters its
/// handler and discards the snapshot.
pub struct MountedConsumer {
    name: String,
    state: Arc<Mutex<ConsumerState>>,
    subscription: Subscription,
}

impl MountedConsumer {
    /// Capture `layout` at the controller's current language and subscribe
    /// for changes.
    pub fn mount(
        name: impl Into<String>,
        controller: &LanguageController,
        layout: SnapshotLayout,
    ) -> Self {
        let name = name.into();
        let snapshot = ConsumerSnapshot::capture(&layout, &controller.translator());
        debug!(
            "Mounted {} with {} strings in {}",
            name,
            snapshot.len(),
            snapshot.language()
        );

        let state = Arc::new(Mutex::new(ConsumerState {
            snapshot,
            refreshes: 0,
        }));

        let handler_state = Arc::clone(&state);
        let subscription = controller.subscribe(move |translator| {
            let snapshot = ConsumerSnapshot::capture(&layout, translator);
            let mut state = lock_state(&handler_state);
            state.snapshot = snapshot;
            state.refreshes += 1;
        });

        Self {
            name,
            state,
            subscription,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text of `slot`.
    pub fn get(&self, slot: &str) -> Option<String> {
        lock_state(&self.state).snapshot.get(slot).map(str::to_string)
    }

    /// Language of the current snapshot.
    pub fn language(&self) -> Language {
        lock_state(&self.state).snapshot.language()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> ConsumerSnapshot {
        lock_state(&self.state).snapshot.clone()
    }

    /// How many times the snapshot has been rebuilt since mounting.
    pub fn refresh_count(&self) -> usize {
        lock_state(&self.state).refreshes
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn unmount(self) {
        debug!("Unmounted {}", self.name);
    }
}

impl std::fmt::Debug for MountedConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedConsumer")
            .field("name", &self.name)
            .field("language", &self.language())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{TranslationStore, TranslationTable};
    use crate::storage::MemoryStorage;

    // ==================== Helper Functions ====================

    fn test_controller() -> LanguageController {
        let zh: TranslationTable = [
            ("index.welcome", "欢迎"),
            ("navbar.home", "首页"),
            ("course.remaining", "剩余{count}个名额"),
        ]
        .into_iter()
        .collect();
        let en: TranslationTable = [
            ("index.welcome", "Welcome"),
            ("navbar.home", "Home"),
            ("course.remaining", "{count} remaining"),
        ]
        .into_iter()
        .collect();
        let store = TranslationStore::from_tables([(Language::ZH_CN, zh), (Language::EN, en)])
            .expect("Should build store");
        LanguageController::new(Arc::new(store), MemoryStorage::new())
    }

    fn home_layout() -> SnapshotLayout {
        ConsumerSnapshot::builder()
            .text("welcomeText", "index.welcome")
            .text("homeText", "navbar.home")
            .text_with("remainingText", "course.remaining", Params::new().with("count", 3))
    }

    // ==================== Layout Tests ====================

    #[test]
    fn test_layout_keeps_binding_order() {
        let layout = home_layout();
        assert_eq!(
            layout.keys(),
            vec!["index.welcome", "navbar.home", "course.remaining"]
        );
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_layout_rebinding_slot_replaces() {
        let layout = SnapshotLayout::new()
            .text("title", "navbar.home")
            .text("title", "index.welcome");
        assert_eq!(layout.keys(), vec!["index.welcome"]);
    }

    // ==================== Capture Tests ====================

    #[test]
    fn test_capture_translates_every_slot() {
        let controller = test_controller();
        let snapshot = ConsumerSnapshot::capture(&home_layout(), &controller.translator());

        assert_eq!(snapshot.language(), Language::ZH_CN);
        assert_eq!(snapshot.get("welcomeText"), Some("欢迎"));
        assert_eq!(snapshot.get("remainingText"), Some("剩余3个名额"));
        assert_eq!(snapshot.get("unknownSlot"), None);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_capture_missing_key_shows_key() {
        let controller = test_controller();
        let layout = SnapshotLayout::new().text("allButton", "button.all");
        let snapshot = ConsumerSnapshot::capture(&layout, &controller.translator());
        assert_eq!(snapshot.get("allButton"), Some("button.all"));
    }

    #[test]
    fn test_snapshot_iter_in_order() {
        let controller = test_controller();
        let snapshot = ConsumerSnapshot::capture(&home_layout(), &controller.translator());
        let slots: Vec<_> = snapshot.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec!["welcomeText", "homeText", "remainingText"]);
    }

    // ==================== Mount Tests ====================

    #[test]
    fn test_mount_captures_current_language() {
        let controller = test_controller();
        let page = MountedConsumer::mount("index", &controller, home_layout());

        assert_eq!(page.name(), "index");
        assert_eq!(page.language(), Language::ZH_CN);
        assert_eq!(page.get("homeText").as_deref(), Some("首页"));
        assert_eq!(page.refresh_count(), 0);
        assert!(page.is_mounted());
    }

    #[test]
    fn test_mounted_consumer_refreshes_on_switch() {
        let mut controller = test_controller();
        let page = MountedConsumer::mount("index", &controller, home_layout());

        controller.set_language("en");

        let snapshot = page.snapshot();
        assert_eq!(snapshot.language(), Language::EN);
        assert_eq!(snapshot.get("welcomeText"), Some("Welcome"));
        assert_eq!(snapshot.get("homeText"), Some("Home"));
        assert_eq!(snapshot.get("remainingText"), Some("3 remaining"));
        assert_eq!(page.refresh_count(), 1);
    }

    #[test]
    fn test_unmount_deregisters() {
        let mut controller = test_controller();
        let page = MountedConsumer::mount("index", &controller, home_layout());
        assert_eq!(controller.bridge().len(), 1);

        page.unmount();
        assert!(controller.bridge().is_empty());
        assert!(controller.set_language("en"));
        assert_eq!(controller.metrics().notifications(), 0);
    }

    #[test]
    fn test_rejected_switch_does_not_refresh() {
        let mut controller = test_controller();
        let page = MountedConsumer::mount("index", &controller, home_layout());

        assert!(!controller.set_language("fr"));
        assert_eq!(page.refresh_count(), 0);
        assert_eq!(page.language(), Language::ZH_CN);
    }
}
