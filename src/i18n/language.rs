//! Language type: validated language representation.
//!
//! A `Language` can only be constructed from a code that the registry lists
//! as enabled, so holding one is proof the code is supported.

use crate::i18n::{I18nError, LanguageConfig, LanguageRegistry};
use std::fmt;

/// Base URL of the flag images shown by the language switcher.
const FLAG_CDN: &str = "https://flagcdn.com/w40";

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "sq", "en")
    code: &'static str,
}

impl Language {
    pub const ALBANIAN: Language = Language { code: "sq" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err(I18nError::UnsupportedLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            _ => Err(I18nError::UnsupportedLanguage(code.to_string())),
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (used as the flag's alt text).
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name shown in the switcher options.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Short label shown on the switcher button (e.g., "SQ").
    pub fn label(&self) -> String {
        self.code.to_uppercase()
    }

    /// URL of the flag image for this language.
    pub fn flag_url(&self) -> String {
        format!("{}/{}.png", FLAG_CDN, self.config().flag)
    }
}

impl Default for Language {
    /// The registry's fallback language.
    fn default() -> Self {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
