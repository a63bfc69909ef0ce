//! Language registry: Single source of truth for all supported languages.
//!
//! The supported set is fixed at compile time. It uses a singleton pattern
//! with `OnceLock` so every component agrees on the same list and the same
//! fallback language.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "sq", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Albanian", "English")
    pub name: &'static str,

    /// Native name shown in the language switcher (e.g., "Shqip")
    pub native_name: &'static str,

    /// ISO 3166 country code of the flag shown next to the language
    pub flag: &'static str,

    /// Whether this is the fallback language (exactly one should be true)
    pub is_default: bool,

    /// Whether this language is offered to users
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in switcher order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the fallback language configuration.
    ///
    /// # Panics
    /// Panics if zero or several languages are marked `is_default`. The table
    /// is static, so this indicates a programming error.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Albanian is the site's primary language and the fallback; English is the
/// only other option.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "sq",
            name: "Albanian",
            native_name: "Shqip",
            flag: "al",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            flag: "gb",
            is_default: false,
            enabled: true,
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
    fn test_get_by_code_albanian() {
        let config = LanguageRegistry::get()
            .get_by_code("sq")
            .expect("Albanian should be registered");

        assert_eq!(config.name, "Albanian");
        assert_eq!(config.native_name, "Shqip");
        assert_eq!(config.flag, "al");
        assert!(config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("en")
            .expect("English should be registered");

        assert_eq!(config.flag, "gb");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_keeps_switcher_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["sq", "en"]);
    }

    #[test]
    fn test_default_language_is_albanian() {
        assert_eq!(LanguageRegistry::get().default_language().code, "sq");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("sq"));
        assert!(registry.is_enabled("en"));
        assert!(!registry.is_enabled("fr"));
        assert!(!registry.is_enabled(""));
    }
}
