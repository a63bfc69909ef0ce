use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::validation::DEFAULT_PHONE_PATTERN;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_source: String,
    pub resource_timeout: Duration,
    pub preferences_file: PathBuf,

    // Calculator
    pub pricing_file: PathBuf,

    // Preview
    pub page_file: PathBuf,

    // Form validation
    pub phone_pattern: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let resource_timeout_secs = match var("RESOURCE_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("RESOURCE_TIMEOUT_SECS is not a number: {}", value))?,
            None => 10,
        };

        Ok(Self {
            // Translations - URL or local path
            translations_source: var("TRANSLATIONS_SOURCE")
                .unwrap_or_else(|| "data/languages.json".to_string()),
            resource_timeout: Duration::from_secs(resource_timeout_secs),
            preferences_file: var("PREFERENCES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/preferences.json")),

            // Calculator
            pricing_file: var("PRICING_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/pricing.json")),

            // Preview
            page_file: var("PAGE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/page.json")),

            // Form validation
            phone_pattern: var("PHONE_PATTERN")
                .unwrap_or_else(|| DEFAULT_PHONE_PATTERN.to_string()),
        })
    }
}
