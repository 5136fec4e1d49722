/// Project detail surface: hero visual, title block, body paragraphs,
/// the image gallery, and the export / back controls.
use iced::widget::{button, column, container, image, mouse_area, row, text, Space};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::widgets::Wrap;
use std::path::PathBuf;

use crate::state::catalog::{GalleryImage, ProjectRecord};
use crate::state::reveal::RevealTracker;
use crate::ui::{reveal_section, theme};
use crate::Message;

const HERO_HEIGHT: f32 = 260.0;
const GALLERY_TILE_WIDTH: f32 = 240.0;
const GALLERY_TILE_HEIGHT: f32 = 160.0;

/// Present one record. `record_index` is the catalog index (export target),
/// `accent` the tile index it was activated from (gradient key).
pub fn detail_view<'a>(
    record: &'a ProjectRecord,
    record_index: usize,
    accent: usize,
    reveal: &RevealTracker,
) -> Element<'a, Message> {
    let back = button(text("← All Projects").size(14))
        .style(|_theme: &Theme, _status| button::Style {
            background: None,
            text_color: theme::accent(),
            ..button::Style::default()
        })
        .on_press(Message::BackToListing);

    let hero: Element<'a, Message> = match &record.hero_image {
        Some(path) => image(image::Handle::from_path(PathBuf::from(path)))
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fill, Length::Fixed(HERO_HEIGHT)))
            .style(move |_theme: &Theme| container::Style {
                background: Some(theme::fallback_gradient(accent)),
                ..container::Style::default()
            })
            .into(),
    };

    // Body text verbatim - first-party content, shown exactly as authored
    let mut body = column![].spacing(12);
    for paragraph in record.paragraphs() {
        body = body.push(text(paragraph).size(15));
    }

    let mut content = column![
        back,
        hero,
        text(&record.title).size(32),
        text(&record.subtitle).size(16).color(theme::muted()),
        body,
    ]
    .spacing(14)
    .padding(24)
    .max_width(960);

    content = content.push(actions(record, record_index));

    if !record.images.is_empty() {
        let gallery = column![text("Images").size(22), gallery_grid(record)].spacing(12);
        content = content.push(reveal_section(
            reveal,
            "detail/gallery",
            GALLERY_TILE_HEIGHT + 60.0,
            gallery.into(),
        ));
    }

    container(content).center_x(Length::Fill).into()
}

/// Export control (or the legacy document link when the record carries no
/// gallery images to build an export from)
fn actions<'a>(record: &'a ProjectRecord, record_index: usize) -> Element<'a, Message> {
    if !record.images.is_empty() {
        row![button(text("Export PDF").size(14))
            .padding([8.0, 16.0])
            .on_press(Message::ExportProject(record_index))]
        .into()
    } else if let Some(url) = &record.pdf_url {
        row![text(format!("Document: {url}")).size(13).color(theme::muted())].into()
    } else {
        row![].into()
    }
}

fn gallery_grid<'a>(record: &'a ProjectRecord) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = record
        .images
        .iter()
        .enumerate()
        .map(|(i, entry)| gallery_tile(entry, i))
        .collect();

    Wrap::with_elements(tiles)
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

fn gallery_tile<'a>(entry: &'a GalleryImage, index: usize) -> Element<'a, Message> {
    let caption = entry.display_caption(index);

    let visual: Element<'a, Message> = match entry.path() {
        Some(path) => image(image::Handle::from_path(PathBuf::from(path)))
            .width(Length::Fixed(GALLERY_TILE_WIDTH))
            .height(Length::Fixed(GALLERY_TILE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("✦").size(36).color(theme::muted()))
            .width(Length::Fixed(GALLERY_TILE_WIDTH))
            .height(Length::Fixed(GALLERY_TILE_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let tile = container(
        column![
            visual,
            container(text(caption).size(12))
                .width(Length::Fixed(GALLERY_TILE_WIDTH))
                .padding([6.0, 8.0]),
        ]
        .align_x(Alignment::Start),
    )
    .style(|_theme: &Theme| container::Style {
        background: Some(theme::panel().into()),
        border: iced::Border {
            radius: 8.0.into(),
            ..iced::Border::default()
        },
        ..container::Style::default()
    });

    // Only populated entries open the lightbox
    if entry.path().is_some() {
        mouse_area(tile)
            .on_press(Message::OpenLightbox(index))
            .into()
    } else {
        tile.into()
    }
}
