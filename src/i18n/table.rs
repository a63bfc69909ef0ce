//! Translation table: language code → key → translated markup.

use crate::i18n::{I18nError, Language};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Translations loaded from the static resource.
///
/// The wire format is a plain JSON object keyed first by language code and
/// then by translation key:
///
/// ```json
/// { "sq": { "nav.home": "Kreu" }, "en": { "nav.home": "Home" } }
/// ```
///
/// Codes outside the supported set are kept but never looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from its JSON body. `location` is only used for errors.
    pub fn from_json(location: &str, body: &str) -> Result<Self, I18nError> {
        serde_json::from_str(body).map_err(|source| I18nError::MalformedResource {
            location: location.to_string(),
            source,
        })
    }

    /// Look up `key` for `language`.
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.entries
            .get(language.code())
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    pub fn contains(&self, language: Language, key: &str) -> bool {
        self.get(language, key).is_some()
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, language: Language, key: &str, value: &str) {
        self.entries
            .entry(language.code().to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, language: Language, key: &str, value: &str) -> Self {
        self.insert(language, key, value);
        self
    }

    /// Keys defined for `language`, sorted.
    pub fn keys(&self, language: Language) -> impl Iterator<Item = &str> {
        self.entries
            .get(language.code())
            .into_iter()
            .flat_map(|strings| strings.keys().map(String::as_str))
    }

    /// Language codes present in the resource, sorted.
    pub fn language_codes(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "sq": { "nav.home": "Kreu", "hero.title": "Ndërtojmë <span>të ardhmen</span>" },
        "en": { "nav.home": "Home" }
    }"#;

    #[test]
    fn test_from_json_and_get() {
        let table = TranslationTable::from_json("languages.json", SAMPLE).expect("Should parse");

        assert_eq!(table.get(Language::ALBANIAN, "nav.home"), Some("Kreu"));
        assert_eq!(table.get(Language::ENGLISH, "nav.home"), Some("Home"));
        assert_eq!(
            table.get(Language::ALBANIAN, "hero.title"),
            Some("Ndërtojmë <span>të ardhmen</span>")
        );
        assert_eq!(table.get(Language::ENGLISH, "hero.title"), None);
    }

    #[test]
    fn test_from_json_rejects_malformed_body() {
        let result = TranslationTable::from_json("languages.json", "<html>not json</html>");
        assert!(matches!(result, Err(I18nError::MalformedResource { .. })));
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        let result = TranslationTable::from_json("languages.json", r#"{ "en": { "a": 1 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_language_codes_are_kept() {
        let table =
            TranslationTable::from_json("languages.json", r#"{ "de": { "a": "b" } }"#).unwrap();
        assert_eq!(table.language_codes(), vec!["de"]);
        assert_eq!(table.keys(Language::ENGLISH).count(), 0);
    }

    #[test]
    fn test_builder_and_keys() {
        let table = TranslationTable::new()
            .with(Language::ENGLISH, "b", "B")
            .with(Language::ENGLISH, "a", "A");

        let keys: Vec<_> = table.keys(Language::ENGLISH).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(table.contains(Language::ENGLISH, "a"));
        assert!(!table.contains(Language::ALBANIAN, "a"));
    }

    #[test]
    fn test_is_empty() {
        assert!(TranslationTable::new().is_empty());
        assert!(TranslationTable::from_json("x", r#"{ "en": {} }"#).unwrap().is_empty());
        assert!(!TranslationTable::new().with(Language::ENGLISH, "a", "A").is_empty());
    }
}
