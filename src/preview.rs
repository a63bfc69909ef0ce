//! JSON preview of a started page, as printed by the binary.

use crate::animation::PRICE_REVEAL;
use crate::calculator::{Breakdown, AREA_ID, PROJECT_TYPE_ID};
use crate::dom::{Document, MemoryDocument};
use crate::i18n::{MetricsReport, ValidationReport};
use crate::preferences::PreferenceStore;
use crate::site::Site;
use anyhow::{bail, Result};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Calculator inputs to submit before rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteRequest {
    pub project_type: String,
    pub area: String,
    pub add_ons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewRequest {
    pub lang: Option<String>,
    pub quote: Option<QuoteRequest>,
}

/// Everything the preview prints.
#[derive(Debug, Serialize)]
pub struct Preview {
    pub language: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Breakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub metrics: MetricsReport,
    pub validation: ValidationReport,
    pub page: MemoryDocument,
}

/// Apply `request` to a started page and collect the result.
///
/// A language the site does not support is logged and skipped; the page is
/// still rendered in the current language.
pub fn render<S: PreferenceStore>(
    site: &mut Site<S>,
    mut document: MemoryDocument,
    request: &PreviewRequest,
    now: Instant,
) -> Result<Preview> {
    if let Some(code) = &request.lang {
        match site.set_language(code, &mut document) {
            Ok(language) => info!("Switched preview to {}", language),
            Err(e) => warn!("Keeping {}: {}", site.engine().current_language(), e),
        }
    }

    let mut quote = None;
    let mut notice = None;
    if let Some(request) = &request.quote {
        fill_calculator(&mut document, request);

        match site.calculate(&mut document, now) {
            Some(Ok(breakdown)) => {
                // Render the finished reveal
                site.tick(&mut document, now + PRICE_REVEAL);
                quote = Some(breakdown);
            }
            Some(Err(e)) => notice = Some(site.message(&e).to_string()),
            None => bail!("The page has no cost calculator"),
        }
    }

    let engine = site.engine();
    Ok(Preview {
        language: engine.current_language().to_string(),
        state: format!("{:?}", engine.state()),
        quote,
        notice,
        metrics: engine.metrics(),
        validation: engine.validate(),
        page: document,
    })
}

fn fill_calculator(document: &mut MemoryDocument, request: &QuoteRequest) {
    if let Some(node) = document.element_by_id(PROJECT_TYPE_ID) {
        document.set_attribute(node, "value", &request.project_type);
    }
    if let Some(node) = document.element_by_id(AREA_ID) {
        document.set_attribute(node, "value", &request.area);
    }
    for id in &request.add_ons {
        if let Some(node) = document.element_by_id(id) {
            document.set_attribute(node, "checked", "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{PricingConfig, CALCULATE_BUTTON_ID, RESULT_ID, TOTAL_ID};
    use crate::dom::{Node, NodeId, TRANSLATION_KEY_ATTR};
    use crate::format::format_counting;
    use crate::preferences::MemoryStore;
    use crate::resource::StaticSource;
    use crate::site::SiteOptions;

    const TABLE: &str = r#"{
        "sq": {
            "nav.home": "Kreu",
            "calculator.error.area_range": "Sipërfaqja duhet të jetë midis 1 dhe 10,000 m²"
        },
        "en": {
            "nav.home": "Home",
            "calculator.error.area_range": "The area must be between 1 and 10,000 m²"
        }
    }"#;

    fn page() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.push(Node::new("body"));
        let home = doc.push(
            Node::new("a")
                .with_parent(body)
                .with_attribute(TRANSLATION_KEY_ATTR, "nav.home"),
        );
        doc.push(Node::new("select").with_parent(body).with_attribute("id", PROJECT_TYPE_ID));
        doc.push(Node::new("input").with_parent(body).with_attribute("id", AREA_ID));
        doc.push(Node::new("button").with_parent(body).with_attribute("id", CALCULATE_BUTTON_ID));
        doc.push(Node::new("div").with_parent(body).with_attribute("id", RESULT_ID));
        doc.push(Node::new("span").with_parent(body).with_attribute("id", TOTAL_ID));
        (doc, home)
    }

    async fn started(doc: &mut MemoryDocument) -> Site<MemoryStore> {
        let options = SiteOptions {
            pricing: PricingConfig::default().with_project_type("residential", 500.0),
            ..SiteOptions::default()
        };
        Site::start(MemoryStore::new(), &StaticSource::new(TABLE), doc, options).await
    }

    // ==================== Language Tests ====================

    #[tokio::test]
    async fn test_unsupported_language_still_renders() {
        let (mut doc, home) = page();
        let mut site = started(&mut doc).await;
        let request = PreviewRequest {
            lang: Some("fr".to_string()),
            quote: None,
        };

        let preview = render(&mut site, doc, &request, Instant::now()).expect("Should render");

        assert_eq!(preview.language, "sq");
        assert_eq!(preview.state, "Ready");
        assert_eq!(preview.page.content(home).as_deref(), Some("Kreu"));
        assert!(preview.quote.is_none());
    }

    #[tokio::test]
    async fn test_supported_language_is_applied() {
        let (mut doc, home) = page();
        let mut site = started(&mut doc).await;
        let request = PreviewRequest {
            lang: Some("en".to_string()),
            quote: None,
        };

        let preview = render(&mut site, doc, &request, Instant::now()).expect("Should render");

        assert_eq!(preview.language, "en");
        assert_eq!(preview.page.content(home).as_deref(), Some("Home"));
    }

    // ==================== Quote Tests ====================

    #[tokio::test]
    async fn test_quote_is_rendered() {
        let (mut doc, _) = page();
        let mut site = started(&mut doc).await;
        let request = PreviewRequest {
            lang: None,
            quote: Some(QuoteRequest {
                project_type: "residential".to_string(),
                area: "100".to_string(),
                add_ons: vec![],
            }),
        };

        let preview = render(&mut site, doc, &request, Instant::now()).expect("Should render");

        let quote = preview.quote.expect("Should have a quote");
        assert_eq!(quote.total, 50_000.0);
        let total = preview.page.element_by_id(TOTAL_ID).unwrap();
        assert_eq!(preview.page.content(total), Some(format_counting(50_000.0)));
    }

    #[tokio::test]
    async fn test_quote_error_becomes_notice_after_language_fallback() {
        let (mut doc, _) = page();
        let mut site = started(&mut doc).await;
        let request = PreviewRequest {
            lang: Some("de".to_string()),
            quote: Some(QuoteRequest {
                project_type: "residential".to_string(),
                area: "20000".to_string(),
                add_ons: vec![],
            }),
        };

        let preview = render(&mut site, doc, &request, Instant::now()).expect("Should render");

        assert!(preview.quote.is_none());
        assert_eq!(
            preview.notice.as_deref(),
            Some("Sipërfaqja duhet të jetë midis 1 dhe 10,000 m²")
        );
    }

    #[tokio::test]
    async fn test_quote_without_calculator_fails() {
        let mut doc = MemoryDocument::new();
        doc.push(Node::new("body"));
        let mut site = started(&mut doc).await;
        let request = PreviewRequest {
            lang: None,
            quote: Some(QuoteRequest::default()),
        };

        assert!(render(&mut site, doc, &request, Instant::now()).is_err());
    }
}
