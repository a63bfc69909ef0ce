//! Page startup and event routing.
//!
//! [`Site::start`] waits for the translation engine before attaching
//! anything else, so every later component sees the final page text.

use crate::calculator::{Breakdown, CalculationError, CalculatorView, PricingConfig, AREA_ID, CALCULATE_BUTTON_ID, PROJECT_TYPE_ID};
use crate::dom::{Document, NodeId};
use crate::i18n::{EngineState, I18nError, Language, SwitcherAction, TranslationEngine};
use crate::preferences::PreferenceStore;
use crate::resource::TranslationSource;
use crate::ui::{
    anchor_target, mark_active_navigation, LazyImages, MenuAction, MobileMenu, ScrollEffects,
    ScrollReveal, StatCounters,
};
use crate::validation::{FieldError, FieldValidator, FormValidation};
use std::time::Instant;
use tracing::{info, warn};

pub struct SiteOptions {
    pub pricing: PricingConfig,
    pub validator: FieldValidator,
    /// Location path of the page, used to highlight the navigation.
    pub path: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            validator: FieldValidator::default(),
            path: "index.html".to_string(),
        }
    }
}

/// Something a click caused that the host has to act on or may report.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Language(SwitcherAction),
    Menu(MenuAction),
    Quote(Breakdown),
    /// A message to show the user, already translated.
    Notice(String),
    ScrollToTop,
    /// Scroll so the node sits below the sticky header; see
    /// [`scroll_target`](crate::ui::scroll_target).
    ScrollToElement(NodeId),
}

pub struct Site<S: PreferenceStore> {
    engine: TranslationEngine<S>,
    calculator: Option<CalculatorView>,
    calculate_button: Option<NodeId>,
    menu: Option<MobileMenu>,
    scroll: ScrollEffects,
    reveal: ScrollReveal,
    lazy: LazyImages,
    counters: StatCounters,
    forms: FormValidation,
}

impl<S: PreferenceStore> Site<S> {
    /// Bring the page up: translations first, then navigation, visibility
    /// driven effects, and finally the interactive widgets.
    pub async fn start<T, D>(store: S, source: &T, document: &mut D, options: SiteOptions) -> Self
    where
        T: TranslationSource,
        D: Document + ?Sized,
    {
        info!("🚀 Initializing page...");

        let mut engine = TranslationEngine::new(store);
        if engine.initialize(source, document).await == EngineState::Fallback {
            warn!("Continuing without translations");
        }

        let menu = MobileMenu::attach(&*document);
        let scroll = ScrollEffects::attach(&*document);
        mark_active_navigation(document, &options.path);

        let reveal = ScrollReveal::attach(&*document);
        let counters = StatCounters::attach(&*document);
        let lazy = LazyImages::attach(&*document);

        let calculator = CalculatorView::attach(&*document, options.pricing);
        let calculate_button = document.element_by_id(CALCULATE_BUTTON_ID);
        let forms = FormValidation::attach(&*document, options.validator);

        info!("✅ All modules initialized");

        Self {
            engine,
            calculator,
            calculate_button,
            menu,
            scroll,
            reveal,
            lazy,
            counters,
            forms,
        }
    }

    pub fn set_language<D: Document + ?Sized>(
        &mut self,
        code: &str,
        document: &mut D,
    ) -> Result<Language, I18nError> {
        self.engine.set_language(code, document)
    }

    /// Route a click on `target`.
    pub fn on_click<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        target: NodeId,
        now: Instant,
    ) -> Vec<Interaction> {
        let mut interactions = Vec::new();

        match self.engine.handle_click(document, target) {
            SwitcherAction::Ignored => {}
            action => interactions.push(Interaction::Language(action)),
        }

        if let Some(menu) = &mut self.menu {
            match menu.handle_click(document, target) {
                MenuAction::Ignored => {}
                action => interactions.push(Interaction::Menu(action)),
            }
        }

        if self.calculate_button.is_some_and(|button| document.contains(button, target)) {
            if let Some(result) = self.calculate(document, now) {
                interactions.push(match result {
                    Ok(breakdown) => Interaction::Quote(breakdown),
                    Err(e) => Interaction::Notice(self.message(&e).to_string()),
                });
            }
        }

        if self
            .scroll
            .back_to_top()
            .is_some_and(|button| document.contains(button, target))
        {
            interactions.push(Interaction::ScrollToTop);
        } else if let Some(node) = anchor_target(&*document, target) {
            interactions.push(Interaction::ScrollToElement(node));
        }

        interactions
    }

    /// Run the calculator. `None` when the page has no calculator.
    pub fn calculate<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        now: Instant,
    ) -> Option<Result<Breakdown, CalculationError>> {
        let calculator = self.calculator.as_mut()?;
        let result = calculator.submit(document, now);
        if let Err(e) = &result {
            warn!("Calculation rejected: {}", e);
        }
        Some(result)
    }

    /// User-facing message for a rejected calculation.
    pub fn message<'a>(&'a self, error: &CalculationError) -> &'a str {
        self.engine.t(error.message_key())
    }

    pub fn on_scroll<D: Document + ?Sized>(&self, document: &mut D, offset: f64) {
        self.scroll.on_scroll(document, offset);
    }

    pub fn on_visible<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId, now: Instant) {
        self.reveal.on_visible(document, node, now);
        self.counters.on_visible(document, node, now);
        self.lazy.on_visible(document, node);
    }

    /// The user typed into `node`.
    pub fn on_input<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId) {
        if let Some(calculator) = &self.calculator {
            if document.element_by_id(AREA_ID) == Some(node) {
                calculator.on_area_input(document);
            }
        }
        self.forms.on_input(document, node);
    }

    /// A select changed value.
    pub fn on_change<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId) {
        if let Some(calculator) = &mut self.calculator {
            if document.element_by_id(PROJECT_TYPE_ID) == Some(node) {
                calculator.on_project_type_change(document);
            }
        }
    }

    /// A form field lost focus.
    pub fn on_blur<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        node: NodeId,
    ) -> Result<(), FieldError> {
        let engine = &self.engine;
        self.forms
            .validate_field(document, node, |key| engine.t(key).to_string())
    }

    /// Advance running animations. Returns whether any is still running.
    pub fn tick<D: Document + ?Sized>(&mut self, document: &mut D, now: Instant) -> bool {
        let calculating = self
            .calculator
            .as_mut()
            .is_some_and(|calculator| calculator.tick(document, now));
        self.reveal.tick(document, now);
        let counting = self.counters.tick(document, now);

        calculating || counting || !self.reveal.is_idle()
    }

    pub fn engine(&self) -> &TranslationEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TranslationEngine<S> {
        &mut self.engine
    }

    pub fn calculator(&self) -> Option<&CalculatorView> {
        self.calculator.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{AddOnKind, RESULT_ID, TOTAL_ID};
    use crate::dom::{MemoryDocument, Node, TRANSLATION_KEY_ATTR};
    use crate::preferences::MemoryStore;
    use crate::resource::StaticSource;
    use crate::ui::{ACTIVE_CLASS, MAIN_NAV_CLASS, MENU_TOGGLE_CLASS, REVEALED_CLASS, REVEAL_CLASS};
    use std::time::Duration;

    const TABLE: &str = r#"{
        "sq": {
            "nav.home": "Kreu",
            "calculator.error.missing_fields": "Ju lutemi plotësoni të gjitha fushat e kërkuara!",
            "validation.required": "Kjo fushë është e detyrueshme"
        },
        "en": {
            "nav.home": "Home",
            "calculator.error.missing_fields": "Please fill in all required fields!",
            "validation.required": "This field is required"
        }
    }"#;

    struct Page {
        doc: MemoryDocument,
        toggle: NodeId,
        home: NodeId,
        calculate: NodeId,
        area: NodeId,
        project_type: NodeId,
        reveal: NodeId,
        name: NodeId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let body = doc.push(Node::new("body"));
        let header = doc.push(Node::new("div").with_class("header-container").with_parent(body));
        let toggle = doc.push(Node::new("button").with_class(MENU_TOGGLE_CLASS).with_parent(header));
        let nav = doc.push(Node::new("nav").with_class(MAIN_NAV_CLASS).with_parent(header));
        let home = doc.push(
            Node::new("a")
                .with_parent(nav)
                .with_attribute("href", "index.html")
                .with_attribute(TRANSLATION_KEY_ATTR, "nav.home"),
        );
        let project_type = doc.push(
            Node::new("select")
                .with_parent(body)
                .with_attribute("id", PROJECT_TYPE_ID),
        );
        let area = doc.push(
            Node::new("input")
                .with_parent(body)
                .with_attribute("id", AREA_ID)
                .with_attribute("type", "number"),
        );
        let calculate = doc.push(
            Node::new("button")
                .with_parent(body)
                .with_attribute("id", CALCULATE_BUTTON_ID),
        );
        doc.push(Node::new("div").with_parent(body).with_attribute("id", RESULT_ID));
        doc.push(Node::new("span").with_parent(body).with_attribute("id", TOTAL_ID));
        let reveal = doc.push(Node::new("section").with_parent(body).with_class(REVEAL_CLASS));
        let name = doc.push(
            Node::new("input")
                .with_parent(body)
                .with_attribute("required", ""),
        );
        Page {
            doc,
            toggle,
            home,
            calculate,
            area,
            project_type,
            reveal,
            name,
        }
    }

    fn options() -> SiteOptions {
        SiteOptions {
            pricing: PricingConfig::default()
                .with_project_type("residential", 500.0)
                .with_add_on("premium-materials", AddOnKind::Percentage(15.0)),
            ..SiteOptions::default()
        }
    }

    async fn started(page: &mut Page) -> Site<MemoryStore> {
        Site::start(
            MemoryStore::new(),
            &StaticSource::new(TABLE),
            &mut page.doc,
            options(),
        )
        .await
    }

    // ==================== Startup Tests ====================

    #[tokio::test]
    async fn test_start_translates_then_attaches() {
        let mut page = page();
        let site = started(&mut page).await;

        assert_eq!(site.engine().state(), EngineState::Ready);
        assert_eq!(page.doc.content(page.home).as_deref(), Some("Kreu"));
        assert!(page.doc.has_class(page.home, ACTIVE_CLASS));
        assert!(site.calculator().is_some());
    }

    #[tokio::test]
    async fn test_start_survives_resource_failure() {
        let mut page = page();
        let mut site = Site::start(
            MemoryStore::new(),
            &StaticSource::new("{ broken"),
            &mut page.doc,
            options(),
        )
        .await;

        assert_eq!(site.engine().state(), EngineState::Fallback);
        assert_eq!(site.engine().current_language(), Language::ALBANIAN);

        // The rest of the page still works
        let interactions = site.on_click(&mut page.doc, page.toggle, Instant::now());
        assert_eq!(interactions, vec![Interaction::Menu(MenuAction::Opened)]);
    }

    // ==================== Calculator Tests ====================

    #[tokio::test]
    async fn test_calculate_click_produces_quote() {
        let mut page = page();
        let mut site = started(&mut page).await;
        page.doc.set_attribute(page.project_type, "value", "residential");
        page.doc.set_attribute(page.area, "value", "20");

        let interactions = site.on_click(&mut page.doc, page.calculate, Instant::now());

        assert_eq!(
            interactions,
            vec![Interaction::Quote(Breakdown {
                base: 10_000.0,
                additional: 0.0,
                total: 10_000.0,
            })]
        );
    }

    #[tokio::test]
    async fn test_calculate_error_is_translated() {
        let mut page = page();
        let mut site = started(&mut page).await;
        site.set_language("en", &mut page.doc).unwrap();

        let interactions = site.on_click(&mut page.doc, page.calculate, Instant::now());

        assert_eq!(
            interactions,
            vec![Interaction::Notice(
                "Please fill in all required fields!".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_project_type_change_hides_result() {
        let mut page = page();
        let mut site = started(&mut page).await;
        page.doc.set_attribute(page.project_type, "value", "residential");
        page.doc.set_attribute(page.area, "value", "20");
        site.on_click(&mut page.doc, page.calculate, Instant::now());
        let result = page.doc.element_by_id(RESULT_ID).unwrap();
        assert!(page.doc.has_class(result, "show"));

        site.on_change(&mut page.doc, page.project_type);

        assert!(!page.doc.has_class(result, "show"));
    }

    // ==================== Navigation Tests ====================

    #[tokio::test]
    async fn test_click_inside_nav_anchor_closes_menu_and_scrolls() {
        let mut page = page();
        let body = page.doc.nodes_with_tag("body")[0];
        let nav = page.doc.nodes_with_class(MAIN_NAV_CLASS)[0];
        let section = page
            .doc
            .push(Node::new("section").with_parent(body).with_attribute("id", "services"));
        let link = page
            .doc
            .push(Node::new("a").with_parent(nav).with_attribute("href", "#services"));
        let label = page.doc.push(Node::new("span").with_parent(link));
        let mut site = started(&mut page).await;
        let now = Instant::now();

        site.on_click(&mut page.doc, page.toggle, now);
        let interactions = site.on_click(&mut page.doc, label, now);

        assert_eq!(
            interactions,
            vec![
                Interaction::Menu(MenuAction::Closed),
                Interaction::ScrollToElement(section),
            ]
        );
    }

    // ==================== Form Tests ====================

    #[tokio::test]
    async fn test_blur_shows_message_in_current_language() {
        let mut page = page();
        let mut site = started(&mut page).await;

        assert_eq!(
            site.on_blur(&mut page.doc, page.name),
            Err(FieldError::Required)
        );
        let message = page.doc.nodes_with_class("error-message")[0];
        assert_eq!(
            page.doc.content(message).as_deref(),
            Some("Kjo fushë është e detyrueshme")
        );

        site.on_input(&mut page.doc, page.name);
        assert!(!page.doc.has_class(page.name, "error"));
    }

    // ==================== Animation Tests ====================

    #[tokio::test]
    async fn test_tick_drives_reveal() {
        let mut page = page();
        let mut site = started(&mut page).await;
        page.doc.set_attribute(page.reveal, "data-delay", "100");
        let now = Instant::now();

        site.on_visible(&mut page.doc, page.reveal, now);
        assert!(site.tick(&mut page.doc, now));
        assert!(!site.tick(&mut page.doc, now + Duration::from_millis(150)));
        assert!(page.doc.has_class(page.reveal, REVEALED_CLASS));
    }
}
