/// State management module
///
/// This module handles all application state, including:
/// - The project catalog and its configuration loading (catalog.rs)
/// - Page navigation, focus ring, and lightbox state (nav.rs)
/// - One-shot scroll-reveal tracking (reveal.rs)

pub mod catalog;
pub mod nav;
pub mod reveal;
