//! Internationalization (i18n) module: live text substitution for the page.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages
//! - `language`: Validated `Language` type
//! - `table`: Translation table loaded from the static resource
//! - `bindings`: Registry of translatable nodes, built once per page
//! - `engine`: The `TranslationEngine` service (`create → initialize → ready`)
//! - `switcher`: Header control for picking a language
//! - `validator`: Table completeness and markup consistency checks
//! - `metrics`: Per-engine counters
//!
//! # Example
//!
//! ```rust,ignore
//! use site_enhance::i18n::TranslationEngine;
//! use site_enhance::preferences::MemoryStore;
//! use site_enhance::resource::FileSource;
//!
//! let mut engine = TranslationEngine::new(MemoryStore::new());
//! engine.initialize(&FileSource::new("data/languages.json"), &mut document).await;
//! engine.set_language("en", &mut document)?;
//! let label = engine.t("calculator.total");
//! ```

mod bindings;
mod engine;
mod error;
mod language;
mod metrics;
mod registry;
mod switcher;
mod table;
mod validator;

pub use bindings::{Binding, BindingRegistry};
pub use engine::{EngineState, PassSummary, TranslationEngine};
pub use error::I18nError;
pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use switcher::{LanguageSwitcher, SwitcherAction};
pub use table::TranslationTable;
pub use validator::{TranslationValidator, ValidationReport};
