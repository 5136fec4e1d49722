/// Top navigation bar: logo, page entries with the active indicator, and
/// a hamburger toggle that replaces the entries at narrow window widths.
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::nav::{NavigationState, Page};
use crate::ui::theme;
use crate::Message;

/// Below this window width the entries collapse behind the hamburger
pub const NARROW_WIDTH: f32 = 700.0;

pub fn nav_bar(nav: &NavigationState, window_width: f32) -> Element<'static, Message> {
    let narrow = window_width < NARROW_WIDTH;

    let logo = button(text("✦ STARFOLIO").size(20))
        .style(logo_style)
        .on_press(Message::Navigate(Page::Home.fragment().to_string()));

    let mut bar = row![logo, Space::with_width(Length::Fill)]
        .align_y(Alignment::Center)
        .spacing(8)
        .padding([10.0, 18.0]);

    if narrow {
        bar = bar.push(
            button(text("☰").size(20))
                .style(logo_style)
                .on_press(Message::ToggleMenu),
        );
    } else {
        for page in Page::NAV_ENTRIES {
            bar = bar.push(nav_entry(nav, page));
        }
    }

    let mut layout = column![bar];

    // Collapsed menu panel, only at narrow widths
    if narrow && nav.menu_open {
        let mut menu = column![].spacing(2).padding([0.0, 18.0]);
        for page in Page::NAV_ENTRIES {
            menu = menu.push(nav_entry(nav, page));
        }
        layout = layout.push(menu);
    }

    container(layout)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(theme::panel().into()),
            ..container::Style::default()
        })
        .into()
}

fn nav_entry(nav: &NavigationState, page: Page) -> Element<'static, Message> {
    let active = nav.indicator_active(page);

    button(text(page.label()).size(15))
        .style(move |_theme: &Theme, _status| entry_style(active))
        .on_press(Message::Navigate(page.fragment().to_string()))
        .padding([6.0, 12.0])
        .into()
}

fn entry_style(active: bool) -> button::Style {
    let mut style = button::Style {
        background: None,
        text_color: if active {
            theme::accent()
        } else {
            theme::muted()
        },
        ..button::Style::default()
    };
    if active {
        style.border = Border {
            color: theme::accent(),
            width: 1.0,
            radius: 4.0.into(),
        };
    }
    style
}

fn logo_style(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: theme::accent(),
        ..button::Style::default()
    }
}
