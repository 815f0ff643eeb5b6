//! Language registry: the fixed, closed set of supported languages.
//!
//! The registry is immutable metadata, built once on first access with
//! `OnceLock` and shared by every store and controller in the process.
//! Registration order is significant: it is the order languages are offered
//! to the user and the order the language toggle cycles through.

use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code as persisted and as used for table file names (e.g. "zh-CN", "en")
    pub code: &'static str,

    /// English name of the language (e.g. "Chinese (Simplified)", "English")
    pub name: &'static str,

    /// Native name of the language (e.g. "简体中文", "English")
    pub native_name: &'static str,

    /// Text a switch button shows when it offers this language (e.g. "中文", "EN")
    pub short_label: &'static str,

    /// Whether this is the fallback language (exactly one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Codes match exactly; "zh-cn" is not "zh-CN".
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages in registration order.
    pub fn list(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The fallback language used when nothing (valid) is persisted.
    ///
    /// Falls back to the first registered language if no entry is flagged
    /// as default.
    pub fn default_config(&self) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_default)
            .unwrap_or(&self.languages[0])
    }

    /// The language after `code` in registration order, wrapping around.
    ///
    /// Unknown codes yield the first registered language.
    pub fn next_after(&self, code: &str) -> &LanguageConfig {
        let next = self
            .languages
            .iter()
            .position(|lang| lang.code == code)
            .map(|idx| (idx + 1) % self.languages.len())
            .unwrap_or(0);
        &self.languages[next]
    }

    /// Check if a language code is in the supported set.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Number of supported languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always `false`; the registry is never empty.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Supported languages: Simplified Chinese (default) and English.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "zh-CN",
            name: "Chinese (Simplified)",
            native_name: "简体中文",
            short_label: "中文",
            is_default: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            short_label: "EN",
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_chinese() {
        let config = LanguageRegistry::get()
            .get_by_code("zh-CN")
            .expect("zh-CN should be registered");
        assert_eq!(config.native_name, "简体中文");
        assert_eq!(config.short_label, "中文");
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("en")
            .expect("en should be registered");
        assert_eq!(config.name, "English");
        assert_eq!(config.short_label, "EN");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("zh-cn").is_none());
        assert!(registry.get_by_code("EN").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_is_in_registration_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, vec!["zh-CN", "en"]);
    }

    #[test]
    fn test_exactly_one_default() {
        let defaults = LanguageRegistry::get()
            .list()
            .into_iter()
            .filter(|lang| lang.is_default)
            .count();
        assert_eq!(defaults, 1);
        assert_eq!(LanguageRegistry::get().default_config().code, "zh-CN");
    }

    #[test]
    fn test_next_after_cycles() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.next_after("zh-CN").code, "en");
        assert_eq!(registry.next_after("en").code, "zh-CN");
        assert_eq!(registry.next_after("fr").code, "zh-CN");
    }

    #[test]
    fn test_is_supported() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_supported("zh-CN"));
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("fr"));
        assert!(!registry.is_supported(""));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
