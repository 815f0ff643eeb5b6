//! Placeholder parameters and interpolation.
//!
//! Templates carry `{name}` placeholders. Interpolation is a single pass over
//! the template: each placeholder with a matching parameter is replaced, every
//! other placeholder is copied through untouched, and substituted values are
//! never scanned again.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^{}\s]+)\}").unwrap())
}

/// Placeholder name -> stringified value.
///
/// Setting a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// # Example
    /// ```ignore
    /// let params = Params::new().with("count", 3).with("danceType", "Jazz");
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Replace every `{name}` in `template` that has a value in `params`.
///
/// A placeholder name is one or more characters other than braces and
/// whitespace, so `{count}` and `{danceType}` are placeholders while
/// `{two words}` is left as literal text even if `params` has that name.
pub fn interpolate(template: &str, params: &Params) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct placeholder names appearing in `template`.
pub fn placeholders(template: &str) -> BTreeSet<&str> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}
