//! Contact form field validation.
//!
//! Fields are `input`, `textarea` and `select` elements. A field is checked
//! when it loses focus: `required` fields must be non-blank, `type="email"`
//! fields must look like an address and `type="tel"` fields must satisfy the
//! configured [`PhoneRule`]. A failing field gets the `error` class and a
//! sibling `.error-message` with the translated message; typing into the
//! field clears both.

use crate::dom::{Document, NodeId};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Albanian mobile numbers: `+355` or `0`, then `67`/`68`/`69` and 7 digits.
pub const DEFAULT_PHONE_PATTERN: &str = r"^(\+355|0)(6[789])\d{7}$";

pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

const FIELD_TAGS: [&str; 3] = ["input", "textarea", "select"];

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field is required")]
    Required,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhone,
}

impl FieldError {
    /// Translation key of the message shown under the field.
    pub fn message_key(&self) -> &'static str {
        match self {
            FieldError::Required => "validation.required",
            FieldError::InvalidEmail => "validation.email",
            FieldError::InvalidPhone => "validation.phone",
        }
    }
}

/// Decides whether a phone number is acceptable.
///
/// Receives the value with all whitespace removed.
pub trait PhoneRule: Send + Sync {
    fn accepts(&self, phone: &str) -> bool;
}

/// A [`PhoneRule`] backed by a regular expression.
#[derive(Debug, Clone)]
pub struct PatternPhoneRule {
    pattern: Regex,
}

impl PatternPhoneRule {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The Albanian mobile plan.
    pub fn albanian_mobile() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PHONE_PATTERN).expect("Invalid regex"),
        }
    }
}

impl PhoneRule for PatternPhoneRule {
    fn accepts(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }
}

/// What kind of value a field holds, from its `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
}

impl FieldKind {
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            Some("email") => FieldKind::Email,
            Some("tel") => FieldKind::Phone,
            _ => FieldKind::Text,
        }
    }
}

/// Validates field values. Pure; knows nothing about the page.
pub struct FieldValidator {
    phone: Box<dyn PhoneRule>,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(Box::new(PatternPhoneRule::albanian_mobile()))
    }
}

impl FieldValidator {
    pub fn new(phone: Box<dyn PhoneRule>) -> Self {
        Self { phone }
    }

    /// Check one value. Only the first failing rule is reported; format
    /// checks are skipped for blank values.
    pub fn check(&self, kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
        let value = value.trim();

        if value.is_empty() {
            return if required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        match kind {
            FieldKind::Email if !email_regex().is_match(value) => Err(FieldError::InvalidEmail),
            FieldKind::Phone => {
                let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                if self.phone.accepts(&compact) {
                    Ok(())
                } else {
                    Err(FieldError::InvalidPhone)
                }
            }
            _ => Ok(()),
        }
    }
}

/// Validation state of the form fields on a page.
pub struct FormValidation {
    validator: FieldValidator,
    fields: Vec<NodeId>,
    /// Error message element created for a field, reused on later failures.
    messages: BTreeMap<NodeId, NodeId>,
}

impl FormValidation {
    pub fn attach<D: Document + ?Sized>(document: &D, validator: FieldValidator) -> Self {
        let mut fields: Vec<NodeId> = FIELD_TAGS
            .iter()
            .flat_map(|tag| document.nodes_with_tag(tag))
            .collect();
        fields.sort();
        debug!("Form validation attached to {} fields", fields.len());

        Self {
            validator,
            fields,
            messages: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> &[NodeId] {
        &self.fields
    }

    /// Validate `field` (on blur) and render the outcome.
    ///
    /// `translate` maps a message key to the text shown to the user.
    pub fn validate_field<D, F>(
        &mut self,
        document: &mut D,
        field: NodeId,
        translate: F,
    ) -> Result<(), FieldError>
    where
        D: Document + ?Sized,
        F: Fn(&str) -> String,
    {
        let kind = FieldKind::from_type_attr(document.attribute(field, "type").as_deref());
        let required = document.attribute(field, "required").is_some();
        let value = document.attribute(field, "value").unwrap_or_default();

        let result = self.validator.check(kind, required, &value);
        match result {
            Ok(()) => self.clear(document, field),
            Err(e) => {
                document.add_class(field, ERROR_CLASS);
                let message = self.message_node(document, field);
                document.set_content(message, &translate(e.message_key()));
                document.remove_attribute(message, "hidden");
            }
        }
        result
    }

    /// The user typed into `field`: drop any error shown for it.
    pub fn on_input<D: Document + ?Sized>(&mut self, document: &mut D, field: NodeId) {
        if document.has_class(field, ERROR_CLASS) {
            self.clear(document, field);
        }
    }

    /// Validate every field, returning the failures.
    pub fn validate_all<D, F>(&mut self, document: &mut D, translate: F) -> Vec<(NodeId, FieldError)>
    where
        D: Document + ?Sized,
        F: Fn(&str) -> String,
    {
        let fields = self.fields.clone();
        fields
            .into_iter()
            .filter_map(|field| {
                self.validate_field(document, field, &translate)
                    .err()
                    .map(|e| (field, e))
            })
            .collect()
    }

    fn clear<D: Document + ?Sized>(&self, document: &mut D, field: NodeId) {
        document.remove_class(field, ERROR_CLASS);
        if let Some(&message) = self.messages.get(&field) {
            document.set_content(message, "");
            document.set_attribute(message, "hidden", "");
        }
    }

    fn message_node<D: Document + ?Sized>(&mut self, document: &mut D, field: NodeId) -> NodeId {
        if let Some(&message) = self.messages.get(&field) {
            return message;
        }
        let parent = document.parent(field);
        let message = document.create_element(parent, "span");
        document.add_class(message, ERROR_MESSAGE_CLASS);
        self.messages.insert(field, message);
        message
    }
}
