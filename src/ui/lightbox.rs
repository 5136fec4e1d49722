/// Full-screen single-image overlay viewer.
///
/// Opens over the detail page, closes on the explicit control, a click on
/// the dimmed backdrop, or Escape (handled by the app's key subscription).
use iced::widget::{button, center, column, container, image, mouse_area, opaque, stack, text};
use iced::{Alignment, Color, Element, Length, Theme};
use std::path::PathBuf;

use crate::state::catalog::ProjectRecord;
use crate::ui::theme;
use crate::Message;

/// Stack the lightbox for gallery entry `image_index` over `base`.
/// An out-of-range or asset-less entry renders no overlay.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    record: &'a ProjectRecord,
    image_index: usize,
) -> Element<'a, Message> {
    let Some(entry) = record.images.get(image_index) else {
        return base;
    };
    let Some(path) = entry.path() else {
        return base;
    };

    let close = button(text("✕").size(18))
        .style(|_theme: &Theme, _status| button::Style {
            background: None,
            text_color: Color::WHITE,
            ..button::Style::default()
        })
        .on_press(Message::CloseLightbox);

    let panel = container(
        column![
            close,
            image::viewer(image::Handle::from_path(PathBuf::from(path)))
                .width(Length::Fixed(880.0))
                .height(Length::Fixed(560.0)),
            text(entry.display_caption(image_index)).size(14).color(theme::muted()),
        ]
        .spacing(10)
        .align_x(Alignment::Center),
    )
    .padding(16)
    .style(|_theme: &Theme| container::Style {
        background: Some(theme::panel().into()),
        border: iced::Border {
            radius: 10.0.into(),
            ..iced::Border::default()
        },
        ..container::Style::default()
    });

    // Dimmed backdrop; clicking it closes the lightbox
    let backdrop = mouse_area(
        center(opaque(panel)).style(|_theme: &Theme| container::Style {
            background: Some(
                Color {
                    a: 0.82,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }),
    )
    .on_press(Message::CloseLightbox);

    stack![base, opaque(backdrop)].into()
}
