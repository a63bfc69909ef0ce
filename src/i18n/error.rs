use thiserror::Error;

/// Failures of the translation engine.
///
/// None of these are fatal: the engine logs them and keeps serving the
/// fallback language or the previous text.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The translation resource could not be retrieved.
    #[error("failed to load translation resource from {location}: {reason}")]
    ResourceLoad { location: String, reason: String },

    /// The resource server answered with a non-success status.
    #[error("translation resource {location} returned HTTP {status}")]
    ResourceStatus { location: String, status: u16 },

    /// The translation resource was retrieved but is not a valid table.
    #[error("malformed translation resource from {location}: {source}")]
    MalformedResource {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// A switch was requested to a language outside the supported set.
    #[error("unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    /// A bound key has no entry for the active language.
    #[error("translation missing for key '{key}' ({language})")]
    MissingTranslation { key: String, language: String },
}

impl I18nError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transport errors, 5xx and 429 are retried; client errors and parse
    /// failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            I18nError::ResourceLoad { .. } => true,
            I18nError::ResourceStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
