//! Page behaviour around the translation engine and the calculator.
//!
//! - `menu`: Mobile menu and active navigation link
//! - `scroll`: Sticky header, back-to-top button, in-page anchor targets
//! - `reveal`: Scroll reveal, lazy images and statistics counters

mod menu;
mod reveal;
mod scroll;

pub use menu::{mark_active_navigation, MenuAction, MobileMenu, ACTIVE_CLASS, MAIN_NAV_CLASS, MENU_TOGGLE_CLASS};
pub use reveal::{
    LazyImages, ScrollReveal, StatCounters, COUNTER_CLASS, COUNTER_TARGET_ATTR, DELAY_ATTR,
    LAZY_SRC_ATTR, REVEALED_CLASS, REVEAL_CLASS,
};
pub use scroll::{
    anchor_target, scroll_target, ScrollEffects, ANCHOR_GAP, BACK_TO_TOP_ID,
    BACK_TO_TOP_THRESHOLD, HEADER_ID, HEADER_THRESHOLD, SCROLLED_CLASS, VISIBLE_CLASS,
};
