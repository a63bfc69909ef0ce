//! Language switcher control in the page header.
//!
//! The open/closed state lives entirely in the document (the `active` class
//! on the container); it never influences which language is current.

use crate::dom::{Document, NodeId};
use crate::i18n::{Language, LanguageRegistry};
use tracing::debug;

const HEADER_CLASS: &str = "header-container";
const OPEN_CLASS: &str = "active";
const LANG_ATTR: &str = "data-lang";

/// Outcome of a click routed through the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherAction {
    /// The click did not concern the switcher.
    Ignored,
    /// The dropdown was opened or closed by its button.
    Toggled { open: bool },
    /// A click outside the open control closed it.
    Dismissed,
    /// An option was chosen; the dropdown is closed.
    Selected(Language),
}

/// Handles to the nodes making up the switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitcher {
    container: NodeId,
    button: NodeId,
    flag: NodeId,
    label: NodeId,
    options: Vec<(Language, NodeId)>,
}

impl LanguageSwitcher {
    /// Build the switcher inside the page header and show `current`.
    ///
    /// Returns `None` when the page has no header container to host it.
    pub fn install<D: Document + ?Sized>(document: &mut D, current: Language) -> Option<Self> {
        let Some(header) = document.nodes_with_class(HEADER_CLASS).into_iter().next() else {
            debug!("No .{} in document, language switcher not installed", HEADER_CLASS);
            return None;
        };

        let container = document.create_element(Some(header), "div");
        document.add_class(container, "language-switcher");

        let button = document.create_element(Some(container), "button");
        document.add_class(button, "language-switcher-btn");
        document.set_attribute(button, "aria-label", "Change Language");
        document.set_attribute(button, "aria-expanded", "false");

        let flag = document.create_element(Some(button), "img");
        document.set_attribute(flag, "id", "current-flag");

        let label = document.create_element(Some(button), "span");
        document.set_attribute(label, "id", "current-lang");

        let dropdown = document.create_element(Some(container), "div");
        document.add_class(dropdown, "language-dropdown");

        let options = LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .filter_map(|config| Language::from_code(config.code).ok())
            .map(|language| {
                let option = document.create_element(Some(dropdown), "div");
                document.add_class(option, "language-option");
                document.set_attribute(option, LANG_ATTR, language.code());

                let option_flag = document.create_element(Some(option), "img");
                document.set_attribute(option_flag, "src", &language.flag_url());
                document.set_attribute(option_flag, "alt", &format!("{} Flag", language.name()));

                let option_name = document.create_element(Some(option), "span");
                document.set_content(option_name, language.native_name());

                (language, option)
            })
            .collect();

        let switcher = Self {
            container,
            button,
            flag,
            label,
            options,
        };
        switcher.sync(document, current);
        Some(switcher)
    }

    /// Reflect `current` in the button and the option list.
    pub fn sync<D: Document + ?Sized>(&self, document: &mut D, current: Language) {
        document.set_attribute(self.flag, "src", &current.flag_url());
        document.set_attribute(self.flag, "alt", current.name());
        document.set_content(self.label, &current.label());

        for (language, node) in &self.options {
            if *language == current {
                document.add_class(*node, OPEN_CLASS);
            } else {
                document.remove_class(*node, OPEN_CLASS);
            }
        }
    }

    pub fn is_open<D: Document + ?Sized>(&self, document: &D) -> bool {
        document.has_class(self.container, OPEN_CLASS)
    }

    /// Open or close the dropdown from its button.
    pub fn toggle<D: Document + ?Sized>(&self, document: &mut D) -> bool {
        let open = document.toggle_class(self.container, OPEN_CLASS);
        document.set_attribute(self.button, "aria-expanded", if open { "true" } else { "false" });
        open
    }

    pub fn close<D: Document + ?Sized>(&self, document: &mut D) {
        document.remove_class(self.container, OPEN_CLASS);
        document.set_attribute(self.button, "aria-expanded", "false");
    }

    /// Route a click on `target` through the switcher.
    ///
    /// Selecting an option only reports the choice; applying it is the
    /// engine's job.
    pub fn handle_click<D: Document + ?Sized>(&self, document: &mut D, target: NodeId) -> SwitcherAction {
        if let Some((language, _)) = self
            .options
            .iter()
            .find(|(_, node)| document.contains(*node, target))
        {
            self.close(document);
            return SwitcherAction::Selected(*language);
        }

        if document.contains(self.button, target) {
            return SwitcherAction::Toggled {
                open: self.toggle(document),
            };
        }

        if !document.contains(self.container, target) && self.is_open(&*document) {
            self.close(document);
            return SwitcherAction::Dismissed;
        }

        SwitcherAction::Ignored
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    /// Option node for `language`, if it is offered.
    pub fn option(&self, language: Language) -> Option<NodeId> {
        self.options
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, node)| *node)
    }
}
