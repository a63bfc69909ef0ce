//! Retrieval of the static translation resource.
//!
//! The resource is fetched exactly once, during engine initialization. Every
//! failure is returned as an [`I18nError`]; deciding what to do with it (fall
//! back to the default language) is the engine's job.

use crate::i18n::{I18nError, TranslationTable};
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Something the engine can load its translation table from.
pub trait TranslationSource {
    /// Human-readable location, used in logs and errors.
    fn location(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<TranslationTable, I18nError>>;
}

/// Resource served over HTTP(S), fetched with retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    retry: RetryConfig,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for translation resource")?;

        Ok(Self {
            client,
            url: url.to_string(),
            retry: RetryConfig::translation_resource(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch_once(&self) -> Result<TranslationTable, I18nError> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| I18nError::ResourceLoad {
                location: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::ResourceStatus {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| I18nError::ResourceLoad {
            location: self.url.clone(),
            reason: e.to_string(),
        })?;

        TranslationTable::from_json(&self.url, &body)
    }
}

impl TranslationSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<TranslationTable, I18nError> {
        let table = with_retry_if(
            &self.retry,
            "Translation resource",
            || self.fetch_once(),
            I18nError::is_transient,
        )
        .await?;

        info!("✓ Loaded translations from {}", self.url);
        Ok(table)
    }
}

/// Resource read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranslationSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<TranslationTable, I18nError> {
        let location = self.location();
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| I18nError::ResourceLoad {
                location: location.clone(),
                reason: e.to_string(),
            })?;

        let table = TranslationTable::from_json(&location, &body)?;
        info!("✓ Loaded translations from {}", location);
        Ok(table)
    }
}

/// Resource already held in memory (embedded defaults, tests).
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl TranslationSource for StaticSource {
    fn location(&self) -> String {
        "<inline>".to_string()
    }

    async fn fetch(&self) -> Result<TranslationTable, I18nError> {
        TranslationTable::from_json(&self.location(), &self.body)
    }
}

/// Source picked at runtime from a configured location string.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpSource),
    File(FileSource),
}

impl ConfiguredSource {
    /// `http://` and `https://` locations are fetched over the network;
    /// anything else is treated as a file path.
    pub fn from_location(location: &str, timeout: Duration) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Self::Http(HttpSource::new(location, timeout)?))
        } else {
            Ok(Self::File(FileSource::new(location)))
        }
    }
}

impl TranslationSource for ConfiguredSource {
    fn location(&self) -> String {
        match self {
            Self::Http(source) => source.location(),
            Self::File(source) => source.location(),
        }
    }

    async fn fetch(&self) -> Result<TranslationTable, I18nError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const BODY: &str = r#"{ "sq": { "nav.home": "Kreu" }, "en": { "nav.home": "Home" } }"#;

    fn fast_retry() -> RetryConfig {
        RetryConfig::new(3, Duration::from_millis(5))
    }

    // ==================== HttpSource Tests ====================

    #[tokio::test]
    async fn test_http_source_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/languages.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/languages.json", mock_server.uri());
        let source = HttpSource::new(&url, Duration::from_secs(5)).unwrap();

        let table = source.fetch().await.expect("Should load");
        assert_eq!(table.get(Language::ENGLISH, "nav.home"), Some("Home"));
    }

    #[tokio::test]
    async fn test_http_source_not_found_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/languages.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/languages.json", mock_server.uri());
        let source = HttpSource::new(&url, Duration::from_secs(5))
            .unwrap()
            .with_retry(fast_retry());

        let result = source.fetch().await;
        assert!(matches!(result, Err(I18nError::ResourceStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_http_source_server_error_is_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/languages.json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let url = format!("{}/languages.json", mock_server.uri());
        let source = HttpSource::new(&url, Duration::from_secs(5))
            .unwrap()
            .with_retry(fast_retry());

        let result = source.fetch().await;
        assert!(matches!(result, Err(I18nError::ResourceStatus { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_http_source_malformed_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = HttpSource::new(&mock_server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retry(fast_retry());

        let result = source.fetch().await;
        assert!(matches!(result, Err(I18nError::MalformedResource { .. })));
    }

    // ==================== FileSource Tests ====================

    #[tokio::test]
    async fn test_file_source_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("languages.json");
        std::fs::write(&path, BODY).unwrap();

        let table = FileSource::new(&path).fetch().await.expect("Should load");
        assert_eq!(table.get(Language::ALBANIAN, "nav.home"), Some("Kreu"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = FileSource::new(dir.path().join("missing.json")).fetch().await;
        assert!(matches!(result, Err(I18nError::ResourceLoad { .. })));
    }

    // ==================== StaticSource Tests ====================

    #[test]
    fn test_static_source() {
        let table = tokio_test::block_on(StaticSource::new(BODY).fetch()).unwrap();
        assert_eq!(table.get(Language::ENGLISH, "nav.home"), Some("Home"));
    }

    // ==================== ConfiguredSource Tests ====================

    #[test]
    fn test_configured_source_picks_kind() {
        let timeout = Duration::from_secs(1);
        assert!(matches!(
            ConfiguredSource::from_location("https://cdn.example.com/languages.json", timeout),
            Ok(ConfiguredSource::Http(_))
        ));
        assert!(matches!(
            ConfiguredSource::from_location("data/languages.json", timeout),
            Ok(ConfiguredSource::File(_))
        ));
    }
}
