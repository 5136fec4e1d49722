/// UI building blocks
///
/// This module handles:
/// - The navigation bar and active indicator (nav_bar.rs)
/// - Project card grids (cards.rs)
/// - The detail surface and gallery (detail.rs)
/// - The single-image lightbox overlay (lightbox.rs)
/// - The animated star-field background (starfield.rs)
/// - Palette and fallback gradients (theme.rs)
use iced::widget::Space;
use iced::{Element, Length};

use crate::state::reveal::RevealTracker;
use crate::Message;

pub mod cards;
pub mod detail;
pub mod lightbox;
pub mod nav_bar;
pub mod starfield;
pub mod theme;

/// Wrap a scroll-revealed section: until the tracker marks it visible it
/// occupies its nominal height as empty space, so layout (and the offsets
/// of sections below it) stays stable.
pub fn reveal_section<'a>(
    reveal: &RevealTracker,
    id: &str,
    nominal_height: f32,
    content: Element<'a, Message>,
) -> Element<'a, Message> {
    if reveal.is_visible(id) {
        content
    } else {
        Space::new(Length::Fill, Length::Fixed(nominal_height)).into()
    }
}
