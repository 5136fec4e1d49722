/// Project card grid.
///
/// Projects catalog records into clickable summary tiles. Two call sites
/// reuse this: the featured subset on the home page and the full listing.
/// Tile order follows catalog order; a tile with no thumbnail falls back
/// to the gradient keyed by its position in the grid.
use iced::widget::{button, column, container, image, text, Space};
use iced::{Border, ContentFit, Element, Length, Theme};
use iced_aw::widgets::Wrap;
use std::path::PathBuf;

use crate::state::catalog::ProjectRecord;
use crate::ui::theme;
use crate::Message;

const CARD_WIDTH: f32 = 280.0;
const THUMB_HEIGHT: f32 = 150.0;

/// Render one grid of cards. `entries` pairs each record with its catalog
/// index; `focused` is the keyboard focus ring position (display index).
/// An empty iterator yields an empty grid, not an error.
pub fn card_grid<'a>(
    entries: impl Iterator<Item = (usize, &'a ProjectRecord)>,
    focused: Option<usize>,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = entries
        .enumerate()
        .map(|(display_index, (record_index, record))| {
            card(record, record_index, display_index, focused == Some(display_index))
        })
        .collect();

    Wrap::with_elements(tiles)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn card<'a>(
    record: &'a ProjectRecord,
    record_index: usize,
    display_index: usize,
    focused: bool,
) -> Element<'a, Message> {
    let thumb: Element<'a, Message> = match &record.thumbnail {
        Some(path) => image(image::Handle::from_path(PathBuf::from(path)))
            .width(Length::Fill)
            .height(Length::Fixed(THUMB_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fill, Length::Fixed(THUMB_HEIGHT)))
            .style(move |_theme: &Theme| container::Style {
                background: Some(theme::fallback_gradient(display_index)),
                ..container::Style::default()
            })
            .into(),
    };

    let body = column![
        text(&record.title).size(18),
        text(&record.subtitle).size(13).color(theme::muted()),
    ]
    .spacing(4)
    .padding(14);

    button(column![thumb, body].width(Length::Fixed(CARD_WIDTH)))
        .padding(0)
        .style(move |_theme: &Theme, status| card_style(status, focused))
        .on_press(Message::OpenProject {
            record: record_index,
            accent: display_index,
        })
        .into()
}

fn card_style(status: button::Status, focused: bool) -> button::Style {
    let highlighted = focused || matches!(status, button::Status::Hovered);
    button::Style {
        background: Some(theme::panel().into()),
        text_color: iced::Color::WHITE,
        border: Border {
            color: if highlighted {
                theme::accent()
            } else {
                iced::Color::TRANSPARENT
            },
            width: if highlighted { 1.5 } else { 0.0 },
            radius: 10.0.into(),
        },
        ..button::Style::default()
    }
}
