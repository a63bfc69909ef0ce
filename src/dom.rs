//! Document abstraction consumed by the translation engine and the UI glue.
//!
//! The engine never talks to a browser directly. Everything it needs from a
//! page (attribute and content access, class toggling, lookup by id or
//! attribute) goes through the [`Document`] trait. [`MemoryDocument`] is the
//! in-process implementation used by the preview binary and the tests.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute carrying the translation key of a node.
pub const TRANSLATION_KEY_ATTR: &str = "data-i18n";

/// Attribute naming the attribute to translate instead of the node content.
pub const TRANSLATION_TARGET_ATTR: &str = "data-i18n-attr";

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// DOM-like collaborator.
///
/// Lookups return owned values so implementations are free to compute them.
pub trait Document {
    /// Find the node whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All nodes carrying attribute `name`, in document order.
    fn nodes_with_attribute(&self, name: &str) -> Vec<NodeId>;

    /// All nodes carrying class `class`, in document order.
    fn nodes_with_class(&self, class: &str) -> Vec<NodeId>;

    /// All elements named `tag`, in document order.
    fn nodes_with_tag(&self, tag: &str) -> Vec<NodeId>;

    fn tag(&self, node: NodeId) -> Option<String>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Rendered content of a node. May contain markup.
    fn content(&self, node: NodeId) -> Option<String>;
    fn set_content(&mut self, node: NodeId, markup: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Toggle `class` on `node`, returning whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// `node` itself or its nearest ancestor named `tag`.
    fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut seen = BTreeSet::new();
        let mut current = Some(node);
        while let Some(id) = current {
            if !seen.insert(id) {
                return None;
            }
            if self.tag(id).is_some_and(|name| name.eq_ignore_ascii_case(tag)) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Create a new element, optionally attached under `parent`.
    fn create_element(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId;

    /// Declared language of the whole document (`<html lang>`).
    fn language(&self) -> Option<String>;
    fn set_language(&mut self, code: &str);
}

/// A single node of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,

    #[serde(default)]
    pub content: String,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Flat, index-addressed document tree.
///
/// Serializes to the page snapshot format read by the preview binary:
///
/// ```json
/// { "lang": "sq", "nodes": [ { "tag": "h1", "attributes": { "data-i18n": "hero.title" } } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its handle.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn ids_where(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| predicate(node))
            .map(|(index, _)| NodeId(index))
            .collect()
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.attributes.get("id").is_some_and(|v| v == id))
            .map(NodeId)
    }

    fn nodes_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.ids_where(|node| node.attributes.contains_key(name))
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.ids_where(|node| node.classes.contains(class))
    }

    fn nodes_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.ids_where(|node| node.tag.eq_ignore_ascii_case(tag))
    }

    fn tag(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|node| node.tag.clone())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.remove(name);
        }
    }

    fn content(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|node| node.content.clone())
    }

    fn set_content(&mut self, node: NodeId, markup: &str) {
        if let Some(node) = self.node_mut(node) {
            node.content = markup.to_string();
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|node| node.classes.contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(node) = self.node_mut(node) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(node) = self.node_mut(node) {
            node.classes.remove(class);
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        // Parent links only point backwards in a well-formed snapshot, but a
        // hand-written one may contain a cycle.
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn create_element(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId {
        let mut node = Node::new(tag);
        node.parent = parent;
        self.push(node)
    }

    fn language(&self) -> Option<String> {
        self.lang.clone()
    }

    fn set_language(&mut self, code: &str) {
        self.lang = Some(code.to_string());
    }
}
