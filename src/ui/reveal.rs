//! Effects triggered when an element first becomes visible.
//!
//! The host reports visibility through `on_visible`; each element reacts at
//! most once. Anything that plays out over time is advanced with `tick`.

use crate::animation::{CountUp, STAT_COUNTER};
use crate::dom::{Document, NodeId};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const REVEAL_CLASS: &str = "reveal-fade-up";
pub const REVEALED_CLASS: &str = "revealed";
pub const COUNTER_CLASS: &str = "counter";

/// Stagger delay of a reveal element, in milliseconds.
pub const DELAY_ATTR: &str = "data-delay";
pub const LAZY_SRC_ATTR: &str = "data-src";
pub const COUNTER_TARGET_ATTR: &str = "data-target";

/// Fade-in of `.reveal-fade-up` elements with their `data-delay`.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    watched: BTreeSet<NodeId>,
    pending: Vec<(NodeId, Instant)>,
}

impl ScrollReveal {
    pub fn attach<D: Document + ?Sized>(document: &D) -> Self {
        Self {
            watched: document.nodes_with_class(REVEAL_CLASS).into_iter().collect(),
            pending: Vec::new(),
        }
    }

    pub fn on_visible<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId, now: Instant) {
        if !self.watched.remove(&node) {
            return;
        }

        let delay = document
            .attribute(node, DELAY_ATTR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);
        self.pending.push((node, now + Duration::from_millis(delay)));
        self.tick(document, now);
    }

    /// Reveal every element whose delay has elapsed.
    pub fn tick<D: Document + ?Sized>(&mut self, document: &mut D, now: Instant) {
        self.pending.retain(|&(node, due)| {
            if due <= now {
                document.add_class(node, REVEALED_CLASS);
                false
            } else {
                true
            }
        });
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

/// `img[data-src]` elements that get their real source once visible.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    watched: BTreeSet<NodeId>,
}

impl LazyImages {
    pub fn attach<D: Document + ?Sized>(document: &D) -> Self {
        let watched = document
            .nodes_with_attribute(LAZY_SRC_ATTR)
            .into_iter()
            .filter(|&node| document.tag(node).is_some_and(|tag| tag.eq_ignore_ascii_case("img")))
            .collect::<BTreeSet<_>>();
        debug!("Watching {} lazy images", watched.len());
        Self { watched }
    }

    /// Returns whether a source was loaded.
    pub fn on_visible<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId) -> bool {
        if !self.watched.remove(&node) {
            return false;
        }
        let Some(src) = document.attribute(node, LAZY_SRC_ATTR) else {
            return false;
        };
        document.set_attribute(node, "src", &src);
        document.remove_attribute(node, LAZY_SRC_ATTR);
        true
    }
}

/// Statistics counters: `.counter[data-target]` counts from 0 to its target,
/// rendered as `"{n}+"`.
#[derive(Debug, Clone, Default)]
pub struct StatCounters {
    watched: BTreeSet<NodeId>,
    running: Vec<(NodeId, CountUp)>,
}

impl StatCounters {
    pub fn attach<D: Document + ?Sized>(document: &D) -> Self {
        Self {
            watched: document.nodes_with_class(COUNTER_CLASS).into_iter().collect(),
            running: Vec::new(),
        }
    }

    pub fn on_visible<D: Document + ?Sized>(&mut self, document: &mut D, node: NodeId, now: Instant) {
        if !self.watched.remove(&node) {
            return;
        }

        let raw = document.attribute(node, COUNTER_TARGET_ATTR).unwrap_or_default();
        let Ok(target) = raw.trim().parse::<u64>() else {
            warn!("Counter has no valid {}: {:?}", COUNTER_TARGET_ATTR, raw);
            return;
        };

        self.running
            .push((node, CountUp::start(0.0, target as f64, STAT_COUNTER, now)));
        self.tick(document, now);
    }

    /// Render every running counter. Returns whether any is still running.
    pub fn tick<D: Document + ?Sized>(&mut self, document: &mut D, now: Instant) -> bool {
        self.running.retain(|(node, count)| {
            let value = count.value_at(now).floor() as u64;
            document.set_content(*node, &format!("{}+", value));
            !count.is_finished(now)
        });
        !self.running.is_empty()
    }
}
