//! Typed pricing configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A selectable kind of project and its price per m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectType {
    pub id: String,
    pub unit_price: f64,
}

/// How an add-on contributes to the additional cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    /// Percentage of the base cost (15.0 means 15%).
    Percentage(f64),
    /// Flat fee in euros.
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub kind: AddOnKind,
}

impl AddOn {
    /// Cost this add-on adds on top of `base`.
    pub fn cost(&self, base: f64) -> f64 {
        match self.kind {
            AddOnKind::Percentage(pct) => base * (pct / 100.0),
            AddOnKind::Fixed(amount) => amount,
        }
    }
}

/// Project types and add-ons offered by the calculator.
///
/// ```json
/// {
///   "project_types": [ { "id": "residential", "unit_price": 500 } ],
///   "add_ons": [ { "id": "premium-materials", "kind": { "percentage": 15 } } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub project_types: Vec<ProjectType>,

    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

impl PricingConfig {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).context("Failed to parse pricing configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pricing file {}", path.display()))?;
        Self::from_json(&body)
    }

    pub fn with_project_type(mut self, id: &str, unit_price: f64) -> Self {
        self.project_types.push(ProjectType {
            id: id.to_string(),
            unit_price,
        });
        self
    }

    pub fn with_add_on(mut self, id: &str, kind: AddOnKind) -> Self {
        self.add_ons.push(AddOn {
            id: id.to_string(),
            kind,
        });
        self
    }

    pub fn unit_price(&self, project_type: &str) -> Option<f64> {
        self.project_types
            .iter()
            .find(|p| p.id == project_type)
            .map(|p| p.unit_price)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{
            "project_types": [
                { "id": "residential", "unit_price": 500 },
                { "id": "commercial", "unit_price": 650.5 }
            ],
            "add_ons": [
                { "id": "premium-materials", "kind": { "percentage": 15 } },
                { "id": "design-consultation", "kind": { "fixed": 500 } }
            ]
        }"#;

        let config = PricingConfig::from_json(json).expect("Should parse");
        assert_eq!(config.unit_price("residential"), Some(500.0));
        assert_eq!(config.unit_price("commercial"), Some(650.5));
        assert_eq!(config.unit_price("villa"), None);
        assert_eq!(
            config.add_on("premium-materials").map(|a| a.kind),
            Some(AddOnKind::Percentage(15.0))
        );
        assert_eq!(
            config.add_on("design-consultation").map(|a| a.kind),
            Some(AddOnKind::Fixed(500.0))
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{ "add_ons": [ { "id": "x", "kind": { "discount": 5 } } ] }"#;
        assert!(PricingConfig::from_json(json).is_err());
    }

    #[test]
    fn test_add_on_cost() {
        let pct = AddOn {
            id: "premium-materials".to_string(),
            kind: AddOnKind::Percentage(15.0),
        };
        let fixed = AddOn {
            id: "design-consultation".to_string(),
            kind: AddOnKind::Fixed(500.0),
        };
        assert_eq!(pct.cost(10_000.0), 1500.0);
        assert_eq!(fixed.cost(10_000.0), 500.0);
        assert_eq!(fixed.cost(0.0), 500.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PricingConfig::load("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read pricing file"));
    }
}
