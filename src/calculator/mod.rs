//! Construction cost calculator.
//!
//! - `pricing`: Typed project types and add-ons
//! - `cost`: `calculate` and its input validation
//! - `form`: `CalculatorView`, the page binding with the animated total

mod cost;
mod form;
mod pricing;

pub use cost::{
    area_feedback, calculate, parse_area, Breakdown, CalculationError, CalculatorInput, Field,
    FieldFeedback, AREA_MAX, AREA_MIN,
};
pub use form::{
    CalculatorView, ADDITIONAL_ID, AREA_ID, BASE_ID, CALCULATE_BUTTON_ID, INVALID_CLASS,
    PROJECT_TYPE_ID, RESULT_ID, SHOW_CLASS, TOTAL_ID,
};
pub use pricing::{AddOn, AddOnKind, PricingConfig, ProjectType};
