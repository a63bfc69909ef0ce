//! Cost computation and input validation.

use crate::calculator::PricingConfig;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Smallest accepted area, in m².
pub const AREA_MIN: f64 = 1.0;

/// Largest accepted area, in m².
pub const AREA_MAX: f64 = 10_000.0;

/// Calculator fields that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectType,
    Area,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::ProjectType => f.write_str("project type"),
            Field::Area => f.write_str("area"),
        }
    }
}

/// Why a calculation request was rejected. The request is simply dropped;
/// no calculator state changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("required field missing: {0}")]
    MissingField(Field),

    #[error("area {value} m² is outside {min}-{max} m²")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("unknown project type '{0}'")]
    UnknownProjectType(String),
}

impl CalculationError {
    /// Translation key of the message shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            CalculationError::MissingField(_) => "calculator.error.missing_fields",
            CalculationError::OutOfRange { .. } => "calculator.error.area_range",
            CalculationError::UnknownProjectType(_) => "calculator.error.project_type",
        }
    }
}

/// Calculator form values as read at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorInput {
    pub project_type: Option<String>,
    pub area: Option<f64>,
    /// Ids of the checked add-ons.
    pub add_ons: BTreeSet<String>,
}

impl CalculatorInput {
    pub fn new(project_type: &str, area: f64) -> Self {
        Self {
            project_type: Some(project_type.to_string()),
            area: Some(area),
            add_ons: BTreeSet::new(),
        }
    }

    pub fn with_add_on(mut self, id: &str) -> Self {
        self.add_ons.insert(id.to_string());
        self
    }

    /// Build the input from raw form strings.
    ///
    /// A blank project type or a blank/non-numeric area is treated as not
    /// filled in.
    pub fn from_form<'a>(
        project_type: &str,
        area: &str,
        checked: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let project_type = Some(project_type.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Self {
            project_type,
            area: parse_area(area),
            add_ons: checked.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Parse an area field; `None` when blank or not a number.
pub fn parse_area(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}

/// Result of a calculation. `total == base + additional`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    pub base: f64,
    pub additional: f64,
    pub total: f64,
}

/// Price a project.
///
/// Checks run in order: required fields, area bounds, project type. Checked
/// add-ons that the configuration does not know are ignored.
pub fn calculate(
    config: &PricingConfig,
    input: &CalculatorInput,
) -> Result<Breakdown, CalculationError> {
    let project_type = input
        .project_type
        .as_deref()
        .ok_or(CalculationError::MissingField(Field::ProjectType))?;
    let area = input
        .area
        .ok_or(CalculationError::MissingField(Field::Area))?;

    if !(AREA_MIN..=AREA_MAX).contains(&area) {
        return Err(CalculationError::OutOfRange {
            value: area,
            min: AREA_MIN,
            max: AREA_MAX,
        });
    }

    let unit_price = config
        .unit_price(project_type)
        .ok_or_else(|| CalculationError::UnknownProjectType(project_type.to_string()))?;

    let base = area * unit_price;

    let additional = input
        .add_ons
        .iter()
        .filter_map(|id| {
            let add_on = config.add_on(id);
            if add_on.is_none() {
                debug!("Ignoring unknown add-on '{}'", id);
            }
            add_on
        })
        .map(|add_on| add_on.cost(base))
        .sum::<f64>();

    Ok(Breakdown {
        base,
        additional,
        total: base + additional,
    })
}

/// Live feedback for the area field while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFeedback {
    /// No indicator: in range, blank, or not a number yet.
    Clear,
    /// Out of range; shown but does not block typing.
    Invalid,
}

pub fn area_feedback(raw: &str) -> FieldFeedback {
    match parse_area(raw) {
        Some(area) if !(AREA_MIN..=AREA_MAX).contains(&area) => FieldFeedback::Invalid,
        _ => FieldFeedback::Clear,
    }
}
