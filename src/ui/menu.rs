//! Mobile navigation menu.

use crate::dom::{Document, NodeId};
use tracing::debug;

pub const MENU_TOGGLE_CLASS: &str = "menu-toggle";
pub const MAIN_NAV_CLASS: &str = "main-nav";
pub const ACTIVE_CLASS: &str = "active";

const SCROLL_LOCK: &str = "overflow: hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Ignored,
    Opened,
    Closed,
}

/// The `.menu-toggle` button and the `.main-nav` it opens.
///
/// While open, the page body is scroll-locked. Whatever inline style the
/// body had before opening is put back on close.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: NodeId,
    nav: NodeId,
    body: Option<NodeId>,
    body_style: Option<String>,
}

impl MobileMenu {
    pub fn attach<D: Document + ?Sized>(document: &D) -> Option<Self> {
        let toggle = document.nodes_with_class(MENU_TOGGLE_CLASS).into_iter().next()?;
        let nav = document.nodes_with_class(MAIN_NAV_CLASS).into_iter().next()?;
        let body = document.nodes_with_tag("body").into_iter().next();

        Some(Self {
            toggle,
            nav,
            body,
            body_style: None,
        })
    }

    pub fn is_open<D: Document + ?Sized>(&self, document: &D) -> bool {
        document.has_class(self.nav, ACTIVE_CLASS)
    }

    /// Route a click anywhere on the page.
    ///
    /// The toggle flips the menu; a link inside the menu or a click outside
    /// both the menu and the toggle closes it.
    pub fn handle_click<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        target: NodeId,
    ) -> MenuAction {
        if document.contains(self.toggle, target) {
            return if self.is_open(&*document) {
                self.close(document);
                MenuAction::Closed
            } else {
                self.open(document);
                MenuAction::Opened
            };
        }

        let inside_nav = document.contains(self.nav, target);
        let on_link = inside_nav && self.is_link(&*document, target);

        if (on_link || !inside_nav) && self.is_open(&*document) {
            self.close(document);
            return MenuAction::Closed;
        }
        MenuAction::Ignored
    }

    fn is_link<D: Document + ?Sized>(&self, document: &D, target: NodeId) -> bool {
        document
            .closest(target, "a")
            .is_some_and(|link| link != self.nav && document.contains(self.nav, link))
    }

    fn open<D: Document + ?Sized>(&mut self, document: &mut D) {
        document.add_class(self.toggle, ACTIVE_CLASS);
        document.add_class(self.nav, ACTIVE_CLASS);
        document.set_attribute(self.toggle, "aria-expanded", "true");
        if let Some(body) = self.body {
            let style = document.attribute(body, "style");
            let locked = match style.as_deref().map(|s| s.trim().trim_end_matches(';')) {
                Some(existing) if !existing.is_empty() => format!("{}; {}", existing, SCROLL_LOCK),
                _ => SCROLL_LOCK.to_string(),
            };
            document.set_attribute(body, "style", &locked);
            self.body_style = style;
        }
        debug!("Mobile menu opened");
    }

    fn close<D: Document + ?Sized>(&mut self, document: &mut D) {
        document.remove_class(self.toggle, ACTIVE_CLASS);
        document.remove_class(self.nav, ACTIVE_CLASS);
        document.set_attribute(self.toggle, "aria-expanded", "false");
        if let Some(body) = self.body {
            match self.body_style.take() {
                Some(style) => document.set_attribute(body, "style", &style),
                None => document.remove_attribute(body, "style"),
            }
        }
    }
}

/// Mark the `.main-nav` links pointing at the current page as active.
///
/// `path` is the location path; an empty last segment means `index.html`.
pub fn mark_active_navigation<D: Document + ?Sized>(document: &mut D, path: &str) -> Vec<NodeId> {
    let page = match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "index.html",
    };

    let navs = document.nodes_with_class(MAIN_NAV_CLASS);
    let links: Vec<NodeId> = document
        .nodes_with_tag("a")
        .into_iter()
        .filter(|&link| navs.iter().any(|&nav| document.contains(nav, link)))
        .filter(|&link| document.attribute(link, "href").as_deref() == Some(page))
        .collect();

    for &link in &links {
        document.add_class(link, ACTIVE_CLASS);
    }
    links
}
