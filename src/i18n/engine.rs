//! The translation engine service.
//!
//! Lifecycle: [`TranslationEngine::new`] creates the service with its
//! preference store, [`initialize`](TranslationEngine::initialize) loads the
//! resource and runs the first substitution pass, after which the engine is
//! either `Ready` or running on the `Fallback` language. No operation of the
//! engine ever fails the caller's startup.

use crate::dom::{Document, NodeId};
use crate::i18n::{
    BindingRegistry, I18nError, Language, LanguageSwitcher, MetricsReport, SwitcherAction,
    TranslationMetrics, TranslationTable, TranslationValidator, ValidationReport,
};
use crate::preferences::{PreferenceStore, LANGUAGE_KEY};
use crate::resource::TranslationSource;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, resource not loaded yet.
    Created,
    /// Resource loaded and first pass applied.
    Ready,
    /// Resource unavailable; serving the default language with page text as is.
    Fallback,
}

/// Result of one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub applied: usize,
    /// Keys that had no translation for the active language.
    pub missing: Vec<String>,
}

pub struct TranslationEngine<S: PreferenceStore> {
    store: S,
    current: Language,
    table: TranslationTable,
    bindings: BindingRegistry,
    switcher: Option<LanguageSwitcher>,
    state: EngineState,
    metrics: TranslationMetrics,
}

impl<S: PreferenceStore> TranslationEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: Language::default(),
            table: TranslationTable::new(),
            bindings: BindingRegistry::new(),
            switcher: None,
            state: EngineState::Created,
            metrics: TranslationMetrics::new(),
        }
    }

    /// Load the translation resource and apply the active language.
    ///
    /// On success the persisted preference (or the default) is applied and
    /// the language switcher installed. On failure the engine stays on the
    /// default language and leaves the page untouched. Either way the
    /// returned state tells the caller which happened; nothing is propagated.
    pub async fn initialize<T, D>(&mut self, source: &T, document: &mut D) -> EngineState
    where
        T: TranslationSource,
        D: Document + ?Sized,
    {
        self.bindings = BindingRegistry::scan(document);
        debug!("Registered {} translatable nodes", self.bindings.len());

        match source.fetch().await {
            Ok(table) => {
                self.table = table;
                let language = self.preferred_language();
                self.switcher = LanguageSwitcher::install(document, language);
                self.apply(language, document);
                self.state = EngineState::Ready;
                info!("✅ i18n initialized ({})", language);
            }
            Err(e) => {
                self.metrics.record_resource_failure();
                error!("❌ Failed to load translations: {}", e);
                self.current = Language::default();
                self.state = EngineState::Fallback;
            }
        }

        self.state
    }

    /// Switch to `code`.
    ///
    /// An unsupported code is logged and ignored: the current language and
    /// the page stay as they are. Re-selecting the active language re-applies
    /// the translations.
    pub fn set_language<D: Document + ?Sized>(
        &mut self,
        code: &str,
        document: &mut D,
    ) -> Result<Language, I18nError> {
        let language = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                self.metrics.record_unsupported_request();
                warn!("Language \"{}\" not supported, keeping {}", code, self.current);
                return Err(e);
            }
        };

        self.apply(language, document);
        Ok(language)
    }

    fn apply<D: Document + ?Sized>(&mut self, language: Language, document: &mut D) {
        self.current = language;

        if let Err(e) = self.store.set(LANGUAGE_KEY, language.code()) {
            warn!("Could not persist language preference: {}", e);
        }

        self.translate_page(document);

        if let Some(switcher) = &self.switcher {
            switcher.sync(document, language);
        }

        document.set_language(language.code());
        self.metrics.record_switch();
        info!("🌍 Language switched to: {}", language);
    }

    /// Write the active language's text into every bound node.
    ///
    /// Nodes whose key has no translation keep their current content; each
    /// one is reported as a warning.
    pub fn translate_page<D: Document + ?Sized>(&self, document: &mut D) -> PassSummary {
        let mut summary = PassSummary::default();

        for binding in self.bindings.iter() {
            match self.lookup(&binding.key) {
                Some(translation) => {
                    match &binding.target_attr {
                        Some(attr) => document.set_attribute(binding.node, attr, translation),
                        None => document.set_content(binding.node, translation),
                    }
                    self.metrics.record_applied();
                    summary.applied += 1;
                }
                None => {
                    let missing = I18nError::MissingTranslation {
                        key: binding.key.clone(),
                        language: self.current.code().to_string(),
                    };
                    warn!("{}", missing);
                    self.metrics.record_missing();
                    summary.missing.push(binding.key.clone());
                }
            }
        }

        summary
    }

    /// Translation of `key` in the active language, or `key` itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Empty strings count as missing, so a blank entry never wipes out
    /// page text.
    fn lookup(&self, key: &str) -> Option<&str> {
        self.table
            .get(self.current, key)
            .filter(|translation| !translation.is_empty())
    }

    /// Track a node created after initialization and translate it now.
    pub fn register<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        node: NodeId,
        key: &str,
        target_attr: Option<&str>,
    ) {
        self.bindings.bind(node, key, target_attr);
        if let Some(translation) = self.lookup(key) {
            match target_attr {
                Some(attr) => document.set_attribute(node, attr, translation),
                None => document.set_content(node, translation),
            }
        }
    }

    /// Stop translating `node`.
    pub fn unregister(&mut self, node: NodeId) {
        self.bindings.unbind(node);
    }

    /// Route a page click through the language switcher, applying a
    /// selection if one was made.
    pub fn handle_click<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        target: NodeId,
    ) -> SwitcherAction {
        let Some(switcher) = &self.switcher else {
            return SwitcherAction::Ignored;
        };

        let action = switcher.handle_click(document, target);
        if let SwitcherAction::Selected(language) = action {
            self.apply(language, document);
        }
        action
    }

    /// Check the loaded table against the keys the page references.
    pub fn validate(&self) -> ValidationReport {
        TranslationValidator::validate_table(&self.table, &self.bindings.keys())
    }

    fn preferred_language(&self) -> Language {
        match self.store.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|_| {
                warn!("Stored language \"{}\" not supported, using default", code);
                Language::default()
            }),
            None => Language::default(),
        }
    }

    pub fn current_language(&self) -> Language {
        self.current
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn switcher(&self) -> Option<&LanguageSwitcher> {
        self.switcher.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }
}
