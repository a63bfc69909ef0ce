//! Binds the calculator to the page elements.

use crate::animation::{CountUp, PRICE_REVEAL};
use crate::calculator::{
    area_feedback, calculate, Breakdown, CalculationError, CalculatorInput, FieldFeedback,
    PricingConfig,
};
use crate::dom::{Document, NodeId};
use crate::format::{format_counting, format_currency};
use std::time::Instant;
use tracing::{debug, info};

pub const CALCULATE_BUTTON_ID: &str = "calculateBtn";
pub const RESULT_ID: &str = "calculatorResult";
pub const PROJECT_TYPE_ID: &str = "projectType";
pub const AREA_ID: &str = "squareMeters";
pub const TOTAL_ID: &str = "totalPrice";
pub const BASE_ID: &str = "basePrice";
pub const ADDITIONAL_ID: &str = "additionalCost";

/// Class that reveals the result panel.
pub const SHOW_CLASS: &str = "show";

/// Class marking the area field as out of range.
pub const INVALID_CLASS: &str = "invalid";

/// Calculator widgets found on the page.
#[derive(Debug, Clone)]
pub struct CalculatorView {
    pricing: PricingConfig,
    result: NodeId,
    project_type: Option<NodeId>,
    area: Option<NodeId>,
    total: Option<NodeId>,
    base: Option<NodeId>,
    additional: Option<NodeId>,
    /// Add-on id and its checkbox; ids without a checkbox are skipped.
    add_ons: Vec<(String, NodeId)>,
    reveal: Option<CountUp>,
}

impl CalculatorView {
    /// Attach to the page. Returns `None` when the page has no calculator.
    pub fn attach<D: Document + ?Sized>(document: &D, pricing: PricingConfig) -> Option<Self> {
        document.element_by_id(CALCULATE_BUTTON_ID)?;
        let result = document.element_by_id(RESULT_ID)?;

        let add_ons = pricing
            .add_ons
            .iter()
            .filter_map(|add_on| {
                document
                    .element_by_id(&add_on.id)
                    .map(|node| (add_on.id.clone(), node))
            })
            .collect::<Vec<_>>();
        debug!("Calculator attached with {} add-on checkboxes", add_ons.len());

        Some(Self {
            result,
            project_type: document.element_by_id(PROJECT_TYPE_ID),
            area: document.element_by_id(AREA_ID),
            total: document.element_by_id(TOTAL_ID),
            base: document.element_by_id(BASE_ID),
            additional: document.element_by_id(ADDITIONAL_ID),
            add_ons,
            pricing,
            reveal: None,
        })
    }

    /// Current form values.
    pub fn read_input<D: Document + ?Sized>(&self, document: &D) -> CalculatorInput {
        let value = |node: Option<NodeId>| {
            node.and_then(|node| document.attribute(node, "value"))
                .unwrap_or_default()
        };

        let checked = self
            .add_ons
            .iter()
            .filter(|(_, node)| document.attribute(*node, "checked").is_some())
            .map(|(id, _)| id.as_str());

        CalculatorInput::from_form(&value(self.project_type), &value(self.area), checked)
    }

    /// Handle the calculate button.
    ///
    /// On success the breakdown is written to the page, the result panel is
    /// shown and the total starts counting up from zero, replacing any reveal
    /// still in progress. On error nothing on the page changes.
    pub fn submit<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        now: Instant,
    ) -> Result<Breakdown, CalculationError> {
        let breakdown = calculate(&self.pricing, &self.read_input(document))?;

        if let Some(base) = self.base {
            document.set_content(base, &format_currency(breakdown.base));
        }
        if let Some(additional) = self.additional {
            document.set_content(additional, &format_currency(breakdown.additional));
        }
        document.add_class(self.result, SHOW_CLASS);

        self.reveal = Some(CountUp::start(0.0, breakdown.total, PRICE_REVEAL, now));
        self.tick(document, now);

        info!("Calculated quote: total {}", breakdown.total);
        Ok(breakdown)
    }

    /// Render the total reveal at `now`. Returns whether it is still running.
    pub fn tick<D: Document + ?Sized>(&mut self, document: &mut D, now: Instant) -> bool {
        let Some(reveal) = self.reveal else {
            return false;
        };

        if let Some(total) = self.total {
            document.set_content(total, &format_counting(reveal.value_at(now)));
        }

        if reveal.is_finished(now) {
            self.reveal = None;
            false
        } else {
            true
        }
    }

    /// Live feedback while the area is being typed.
    pub fn on_area_input<D: Document + ?Sized>(&self, document: &mut D) -> FieldFeedback {
        let Some(area) = self.area else {
            return FieldFeedback::Clear;
        };

        let raw = document.attribute(area, "value").unwrap_or_default();
        let feedback = area_feedback(&raw);
        match feedback {
            FieldFeedback::Invalid => document.add_class(area, INVALID_CLASS),
            FieldFeedback::Clear => document.remove_class(area, INVALID_CLASS),
        }
        feedback
    }

    /// A new project type invalidates the shown result.
    pub fn on_project_type_change<D: Document + ?Sized>(&mut self, document: &mut D) {
        document.remove_class(self.result, SHOW_CLASS);
    }

    pub fn is_animating(&self) -> bool {
        self.reveal.is_some()
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn result(&self) -> NodeId {
        self.result
    }
}
