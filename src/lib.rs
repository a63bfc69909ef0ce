//! Front-end behaviour for a construction company website: live
//! translation of the page, a project cost calculator, contact form
//! validation and the surrounding navigation and scroll effects.
//!
//! The browser is reached only through the [`dom::Document`] trait.

pub mod animation;
pub mod calculator;
pub mod config;
pub mod dom;
pub mod format;
pub mod i18n;
pub mod preferences;
pub mod preview;
pub mod resource;
pub mod retry;
pub mod site;
pub mod ui;
pub mod validation;
