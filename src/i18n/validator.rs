//! Locale table validation.
//!
//! Compares each translation table against the default language's table:
//! every key must be present, placeholders must survive translation, and
//! values should not be blank. A handful of keys the app shell cannot run
//! without are required in every table.

use crate::i18n::params::placeholders;
use crate::i18n::{Language, TranslationStore, TranslationTable};

/// Keys every table must define.
pub const REQUIRED_KEYS: &[&str] = &[
    "app.name",
    "index.welcome",
    "navbar.home",
    "navbar.booking",
    "navbar.profile",
];

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a table unusable as shipped
    pub errors: Vec<String>,

    /// Problems worth a look that do not block shipping
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Append `other`, prefixing each message with `[label]`.
    pub fn merge(&mut self, label: &str, other: ValidationReport) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("[{}] {}", label, e)));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("[{}] {}", label, w)));
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TableValidator;

impl TableValidator {
    /// Check `candidate` against `reference`.
    ///
    /// - error: a reference key is missing from the candidate
    /// - warning: the candidate has a key the reference lacks
    /// - warning: a shared key's placeholder set differs
    /// - warning: a candidate value is empty
    pub fn validate(reference: &TranslationTable, candidate: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, reference_value) in reference.entries() {
            match candidate.get(key) {
                None => report.errors.push(format!("Missing key '{}'", key)),
                Some(candidate_value) => {
                    let expected = placeholders(reference_value);
                    let actual = placeholders(candidate_value);
                    if expected != actual {
                        report.warnings.push(format!(
                            "Placeholder mismatch for '{}': expected {:?}, found {:?}",
                            key, expected, actual
                        ));
                    }
                }
            }
        }

        for key in candidate.keys() {
            if !reference.contains_key(key) {
                report.warnings.push(format!("Extra key '{}'", key));
            }
        }

        report.warnings.extend(Self::empty_values(candidate));
        report
    }

    /// Errors for every [`REQUIRED_KEYS`] entry missing or empty in `table`.
    pub fn validate_required(table: &TranslationTable) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| table.get(key).map_or(true, str::is_empty))
            .map(|key| format!("Required key '{}' is missing or empty", key))
            .collect()
    }

    fn empty_values(table: &TranslationTable) -> Vec<String> {
        table
            .entries()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| format!("Empty value for '{}'", key))
            .collect()
    }

    /// Validate every table in `store` against the default language.
    pub fn validate_store(store: &TranslationStore) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default = Language::default_language();

        let Some(reference) = store.table(default) else {
            report
                .errors
                .push(format!("No table for default language {}", default));
            return report;
        };

        for language in store.supported_languages() {
            let Some(table) = store.table(language) else {
                report
                    .errors
                    .push(format!("No table for language {}", language));
                continue;
            };

            let mut table_report = if language == default {
                ValidationReport {
                    errors: Vec::new(),
                    warnings: Self::empty_values(table),
                }
            } else {
                Self::validate(reference, table)
            };
            table_report.errors.extend(Self::validate_required(table));
            report.merge(language.code(), table_report);
        }

        report
    }
}
