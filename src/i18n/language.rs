//! Language type: a validated language code.
//!
//! A `Language` can only be obtained for a code in the registry, so holding
//! one is proof the code is supported.

use crate::error::I18nError;
use crate::i18n::{LanguageConfig, LanguageRegistry};
use std::fmt;
use std::str::FromStr;

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    /// Simplified Chinese, the default language.
    pub const ZH_CN: Language = Language { code: "zh-CN" };

    /// English.
    pub const EN: Language = Language { code: "en" };

    /// Create a Language from a code string.
    ///
    /// Surrounding whitespace is ignored; the code itself must match a
    /// registered code exactly.
    ///
    /// # Example
    /// ```ignore
    /// let english = Language::from_code("en")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        let trimmed = code.trim();
        LanguageRegistry::get()
            .get_by_code(trimmed)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| I18nError::UnsupportedLanguage(trimmed.to_string()))
    }

    /// The registry's default language.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_config().code,
        }
    }

    /// All supported languages, in registration order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// The language a toggle switches to from this one.
    pub fn next(&self) -> Language {
        Language {
            code: LanguageRegistry::get().next_after(self.code).code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for a
    /// `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Label a switch button shows when offering this language.
    pub fn short_label(&self) -> &'static str {
        self.config().short_label
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_chinese_constant() {
        let chinese = Language::ZH_CN;
        assert_eq!(chinese.code(), "zh-CN");
        assert_eq!(chinese.native_name(), "简体中文");
        assert!(chinese.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::EN;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Language::from_code("en").unwrap(), Language::EN);
        assert_eq!(Language::from_code("zh-CN").unwrap(), Language::ZH_CN);
    }

    #[test]
    fn test_from_code_trims_whitespace() {
        assert_eq!(Language::from_code("  en\n").unwrap(), Language::EN);
    }

    #[test]
    fn test_from_code_unsupported() {
        let result = Language::from_code("fr");
        assert!(matches!(result, Err(I18nError::UnsupportedLanguage(code)) if code == "fr"));
    }

    #[test]
    fn test_from_code_wrong_case() {
        assert!(Language::from_code("zh-cn").is_err());
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_all_in_registration_order() {
        assert_eq!(Language::all(), vec![Language::ZH_CN, Language::EN]);
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(Language::ZH_CN.next(), Language::EN);
        assert_eq!(Language::EN.next(), Language::ZH_CN);
    }

    #[test]
    fn test_default_is_chinese() {
        assert_eq!(Language::default(), Language::ZH_CN);
        assert_eq!(Language::default_language(), Language::ZH_CN);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Language::ZH_CN.to_string(), "zh-CN");
        let parsed: Language = "en".parse().unwrap();
        assert_eq!(parsed, Language::EN);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_short_labels() {
        assert_eq!(Language::ZH_CN.short_label(), "中文");
        assert_eq!(Language::EN.short_label(), "EN");
    }
}
