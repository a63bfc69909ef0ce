//! Registry of translatable nodes.
//!
//! The document is scanned once for `data-i18n` tags when the engine
//! initializes; every later pass walks this list instead of the whole tree.

use crate::dom::{Document, NodeId, TRANSLATION_KEY_ATTR, TRANSLATION_TARGET_ATTR};

/// One translatable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub node: NodeId,
    pub key: String,
    /// Attribute to write instead of the node content (e.g., `placeholder`).
    pub target_attr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from every tagged node of `document`.
    ///
    /// Empty keys are skipped, and so is an empty target attribute (the
    /// content is translated instead).
    pub fn scan<D: Document + ?Sized>(document: &D) -> Self {
        let bindings = document
            .nodes_with_attribute(TRANSLATION_KEY_ATTR)
            .into_iter()
            .filter_map(|node| {
                let key = document.attribute(node, TRANSLATION_KEY_ATTR)?;
                if key.trim().is_empty() {
                    return None;
                }
                let target_attr = document
                    .attribute(node, TRANSLATION_TARGET_ATTR)
                    .filter(|attr| !attr.trim().is_empty());
                Some(Binding {
                    node,
                    key,
                    target_attr,
                })
            })
            .collect();

        Self { bindings }
    }

    /// Register a node created after the initial scan.
    pub fn bind(&mut self, node: NodeId, key: &str, target_attr: Option<&str>) {
        self.bindings.push(Binding {
            node,
            key: key.to_string(),
            target_attr: target_attr.map(str::to_string),
        });
    }

    /// Drop every binding of `node`.
    pub fn unbind(&mut self, node: NodeId) {
        self.bindings.retain(|binding| binding.node != node);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Distinct keys referenced by the document, in first-seen order.
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for binding in &self.bindings {
            if !seen.contains(&binding.key.as_str()) {
                seen.push(binding.key.as_str());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
