//! Translation table validation.
//!
//! Every key referenced by the page should exist for every supported
//! language, and a translation should carry the same markup as the default
//! language's text so that styled fragments (`<span>`, `<br>`) survive a
//! switch. Violations are reported, never enforced.

use crate::i18n::{Language, LanguageRegistry, TranslationTable};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Keys the page needs that a language does not define
    pub errors: Vec<String>,

    /// Non-critical inconsistencies between languages
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

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TranslationValidator;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate `table` against the keys referenced by the page.
    ///
    /// - a referenced key missing for an enabled language is an error
    /// - a key defined for one language but not another is a warning
    /// - a translation whose markup differs from the default language's is a
    ///   warning
    /// - a language in the resource that is not enabled is a warning
    pub fn validate_table(table: &TranslationTable, referenced_keys: &[&str]) -> ValidationReport {
        let mut report = ValidationReport::new();
        let languages: Vec<Language> = LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .filter_map(|config| Language::from_code(config.code).ok())
            .collect();

        for language in &languages {
            for key in referenced_keys {
                if !table.contains(*language, key) {
                    report
                        .errors
                        .push(format!("Missing key '{}' for language '{}'", key, language));
                }
            }
        }

        for language in &languages {
            for other in languages.iter().filter(|other| *other != language) {
                for key in table.keys(*language) {
                    if !table.contains(*other, key) && !referenced_keys.contains(&key) {
                        report.warnings.push(format!(
                            "Key '{}' defined for '{}' but not for '{}'",
                            key, language, other
                        ));
                    }
                }
            }
        }

        for code in table.language_codes() {
            if !languages.iter().any(|language| language.code() == code) {
                report
                    .warnings
                    .push(format!("Language '{}' is not supported and will be ignored", code));
            }
        }

        let reference = Language::default();
        for key in table.keys(reference) {
            let Some(original) = table.get(reference, key) else {
                continue;
            };
            for language in languages.iter().filter(|lang| **lang != reference) {
                if let Some(translated) = table.get(*language, key) {
                    for warning in Self::validate_entry(original, translated).warnings {
                        report
                            .warnings
                            .push(format!("Key '{}' ({}): {}", key, language, warning));
                    }
                }
            }
        }

        report
    }

    /// Compare one translation against its reference text.
    pub fn validate_entry(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let orig_tags = Self::extract_tags(original);
        let trans_tags = Self::extract_tags(translated);
        if orig_tags != trans_tags {
            report.warnings.push(format!(
                "Markup mismatch: original has {:?}, translation has {:?}",
                orig_tags, trans_tags
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        report
    }

    /// Extract opening and closing tag names, e.g. `<span>` and `</span>`.
    fn extract_tags(text: &str) -> Vec<String> {
        let regex =
            TAG_REGEX.get_or_init(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap());

        regex
            .captures_iter(text)
            .map(|cap| format!("{}{}", &cap[1], cap[2].to_lowercase()))
            .collect()
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r#"https?://[^\s"'<>]+"#).unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
