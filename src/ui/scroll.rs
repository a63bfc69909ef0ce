//! Scroll-position driven effects.

use crate::dom::{Document, NodeId};

pub const HEADER_ID: &str = "mainHeader";
pub const BACK_TO_TOP_ID: &str = "backToTop";

pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "show";

/// Header turns opaque past this offset.
pub const HEADER_THRESHOLD: f64 = 100.0;

/// Back-to-top button appears past this offset.
pub const BACK_TO_TOP_THRESHOLD: f64 = 500.0;

/// Gap left between the sticky header and an anchor's target.
pub const ANCHOR_GAP: f64 = 20.0;

/// Sticky header and back-to-top button state.
#[derive(Debug, Clone, Default)]
pub struct ScrollEffects {
    header: Option<NodeId>,
    back_to_top: Option<NodeId>,
}

impl ScrollEffects {
    pub fn attach<D: Document + ?Sized>(document: &D) -> Self {
        Self {
            header: document.element_by_id(HEADER_ID),
            back_to_top: document.element_by_id(BACK_TO_TOP_ID),
        }
    }

    /// Apply the effects for vertical scroll position `offset`.
    pub fn on_scroll<D: Document + ?Sized>(&self, document: &mut D, offset: f64) {
        if let Some(header) = self.header {
            set_class(document, header, SCROLLED_CLASS, offset > HEADER_THRESHOLD);
        }
        if let Some(button) = self.back_to_top {
            set_class(document, button, VISIBLE_CLASS, offset > BACK_TO_TOP_THRESHOLD);
        }
    }

    pub fn back_to_top(&self) -> Option<NodeId> {
        self.back_to_top
    }
}

fn set_class<D: Document + ?Sized>(document: &mut D, node: NodeId, class: &str, on: bool) {
    if on {
        document.add_class(node, class);
    } else {
        document.remove_class(node, class);
    }
}

/// Element an in-page link (`href="#id"`) scrolls to. `target` may be the
/// link or anything inside it. A bare `#` or an unknown id yields `None` and
/// the link keeps its default behaviour.
pub fn anchor_target<D: Document + ?Sized>(document: &D, target: NodeId) -> Option<NodeId> {
    let link = document.closest(target, "a")?;
    let href = document.attribute(link, "href")?;
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    document.element_by_id(id)
}

/// Scroll position that puts an element at `offset_top` just below a sticky
/// header of `header_height`.
pub fn scroll_target(offset_top: f64, header_height: f64) -> f64 {
    offset_top - header_height - ANCHOR_GAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, Node};

    fn page() -> (MemoryDocument, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let header = doc.push(Node::new("header").with_attribute("id", HEADER_ID));
        let button = doc.push(Node::new("button").with_attribute("id", BACK_TO_TOP_ID));
        (doc, header, button)
    }

    #[test]
    fn test_scroll_thresholds() {
        let (mut doc, header, button) = page();
        let effects = ScrollEffects::attach(&doc);

        effects.on_scroll(&mut doc, 100.0);
        assert!(!doc.has_class(header, SCROLLED_CLASS));

        effects.on_scroll(&mut doc, 101.0);
        assert!(doc.has_class(header, SCROLLED_CLASS));
        assert!(!doc.has_class(button, VISIBLE_CLASS));

        effects.on_scroll(&mut doc, 501.0);
        assert!(doc.has_class(button, VISIBLE_CLASS));

        effects.on_scroll(&mut doc, 0.0);
        assert!(!doc.has_class(header, SCROLLED_CLASS));
        assert!(!doc.has_class(button, VISIBLE_CLASS));
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut doc = MemoryDocument::new();
        let effects = ScrollEffects::attach(&doc);
        effects.on_scroll(&mut doc, 1000.0);
        assert_eq!(doc, MemoryDocument::new());
    }

    #[test]
    fn test_anchor_target() {
        let (mut doc, _, _) = page();
        let section = doc.push(Node::new("section").with_attribute("id", "services"));
        let to_section = doc.push(Node::new("a").with_attribute("href", "#services"));
        let bare = doc.push(Node::new("a").with_attribute("href", "#"));
        let unknown = doc.push(Node::new("a").with_attribute("href", "#nowhere"));
        let external = doc.push(Node::new("a").with_attribute("href", "about.html"));

        assert_eq!(anchor_target(&doc, to_section), Some(section));
        assert_eq!(anchor_target(&doc, bare), None);
        assert_eq!(anchor_target(&doc, unknown), None);
        assert_eq!(anchor_target(&doc, external), None);
    }

    #[test]
    fn test_anchor_target_from_inside_link() {
        let (mut doc, _, _) = page();
        let section = doc.push(Node::new("section").with_attribute("id", "services"));
        let link = doc.push(Node::new("a").with_attribute("href", "#services"));
        let label = doc.push(Node::new("span").with_parent(link));
        let icon = doc.push(Node::new("i").with_parent(label));
        let loose = doc.push(Node::new("span"));

        assert_eq!(anchor_target(&doc, label), Some(section));
        assert_eq!(anchor_target(&doc, icon), Some(section));
        assert_eq!(anchor_target(&doc, loose), None);
    }

    #[test]
    fn test_scroll_target_offsets_header() {
        assert_eq!(scroll_target(1200.0, 80.0), 1100.0);
        assert_eq!(scroll_target(50.0, 80.0), -50.0);
    }
}
