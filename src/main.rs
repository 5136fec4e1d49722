use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::widget::{button, canvas, column, container, row, stack, text};
use iced::{window, Element, Length, Size, Subscription, Task, Theme};
use std::time::Instant;

mod export;
mod state;
mod ui;

use export::plan;
use export::ExportSummary;
use state::catalog::Catalog;
use state::nav::{NavigationState, Page};
use state::reveal::RevealTracker;
use ui::starfield::StarField;
use ui::theme;

/// Main application state: the catalog, navigation, reveal tracking, and
/// the star-field background. Owned here and passed into the view
/// builders - the views never reach for ambient globals.
struct Starfolio {
    catalog: Catalog,
    nav: NavigationState,
    reveal: RevealTracker,
    starfield: StarField,
    window: Size,
    viewport_height: f32,
    /// Status line at the bottom of the window
    status: String,
    /// Dismissible notice for surfaced failures (export, degraded assets)
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Activation of anything carrying a navigation target. Unknown
    /// targets are silently ignored.
    Navigate(String),
    ToggleMenu,
    /// A card was activated: catalog index plus the tile index it was
    /// shown at (which keys its fallback gradient)
    OpenProject { record: usize, accent: usize },
    /// The detail page's back control (fixed target: the listing)
    BackToListing,
    OpenLightbox(usize),
    CloseLightbox,
    /// Tab / Shift+Tab over the visible card grid
    FocusMoved { backward: bool },
    ActivateFocused,
    EscapePressed,
    BodyScrolled(scrollable::Viewport),
    /// Deferred reveal re-evaluation, one tick after a page switch
    RevealSweep,
    ExportProject(usize),
    ExportPortfolio,
    ExportFinished(Result<ExportSummary, String>),
    DismissNotice,
    Tick(Instant),
    WindowResized(Size),
}

fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("content")
}

impl Starfolio {
    fn new() -> (Self, Task<Message>) {
        let catalog = Catalog::load_or_sample();
        // First CLI argument acts as the deep link (the URL-hash analog);
        // absent or unrecognized defaults to home
        let deep_link = std::env::args().nth(1);
        let nav = NavigationState::new(deep_link.as_deref());

        println!(
            "🚀 Starfolio initialized with {} projects ({} featured)",
            catalog.len(),
            catalog.featured_len()
        );

        let status = format!(
            "Ready. {} projects, {} featured.",
            catalog.len(),
            catalog.featured_len()
        );

        let mut app = Starfolio {
            catalog,
            nav,
            reveal: RevealTracker::new(),
            starfield: StarField::new(0x5742_13fd),
            window: Size::new(1100.0, 760.0),
            viewport_height: 700.0,
            status,
            notice: None,
        };
        app.register_sections();

        // Sections already inside the viewport on the initial page must
        // reveal without waiting for a scroll event
        let sweep = Task::perform(std::future::ready(()), |_| Message::RevealSweep);
        (app, sweep)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(target) => {
                if self.nav.switch_page(&target) {
                    self.after_page_switch()
                } else {
                    // Tolerance policy: stale or unknown targets never
                    // disturb the active page
                    Task::none()
                }
            }
            Message::ToggleMenu => {
                self.nav.menu_open = !self.nav.menu_open;
                Task::none()
            }
            Message::OpenProject { record, accent } => {
                if record < self.catalog.len() {
                    self.nav.present(record, accent);
                    self.after_page_switch()
                } else {
                    Task::none()
                }
            }
            Message::BackToListing => {
                self.nav.back_to_listing();
                self.after_page_switch()
            }
            Message::OpenLightbox(image_index) => {
                let has_asset = self
                    .detail_record()
                    .and_then(|(_, r)| r.images.get(image_index))
                    .and_then(|entry| entry.path())
                    .is_some();
                if has_asset {
                    self.nav.open_lightbox(image_index);
                    // No point burning frames behind an opaque overlay
                    self.starfield.pause();
                }
                Task::none()
            }
            Message::CloseLightbox => {
                if let Some(restore) = self.nav.close_lightbox() {
                    self.starfield.resume();
                    return scrollable::scroll_to(
                        scroll_id(),
                        AbsoluteOffset { x: 0.0, y: restore },
                    );
                }
                Task::none()
            }
            Message::FocusMoved { backward } => {
                let count = self.visible_card_count();
                self.nav.move_focus(count, backward);
                Task::none()
            }
            Message::ActivateFocused => {
                let Some(focus) = self.nav.focused_card else {
                    return Task::none();
                };
                let record = match self.nav.current() {
                    Page::Home => self.catalog.featured().nth(focus).map(|(i, _)| i),
                    Page::Projects => (focus < self.catalog.len()).then_some(focus),
                    _ => None,
                };
                match record {
                    Some(record) => self.update(Message::OpenProject {
                        record,
                        accent: focus,
                    }),
                    None => Task::none(),
                }
            }
            Message::EscapePressed => {
                if self.nav.lightbox.is_some() {
                    self.update(Message::CloseLightbox)
                } else {
                    self.nav.menu_open = false;
                    Task::none()
                }
            }
            Message::BodyScrolled(viewport) => {
                self.nav.scroll_top = viewport.absolute_offset().y;
                self.viewport_height = viewport.bounds().height;
                self.reveal
                    .sweep(self.nav.scroll_top, self.viewport_height);
                Task::none()
            }
            Message::RevealSweep => {
                self.reveal
                    .sweep(self.nav.scroll_top, self.viewport_height);
                Task::none()
            }
            Message::ExportProject(index) => {
                let Some(record) = self.catalog.get(index) else {
                    return Task::none();
                };
                let blocks = plan::plan_single(record);
                let filename = plan::single_filename(&record.title);
                self.start_export(blocks, record.title.clone(), &filename)
            }
            Message::ExportPortfolio => {
                match plan::plan_portfolio(self.catalog.records()) {
                    Some(blocks) => self.start_export(
                        blocks,
                        "Project Portfolio".to_string(),
                        plan::PORTFOLIO_FILENAME,
                    ),
                    None => {
                        self.notice =
                            Some("Nothing to export: no published projects.".to_string());
                        Task::none()
                    }
                }
            }
            Message::ExportFinished(Ok(summary)) => {
                self.status = format!(
                    "✅ Exported {} ({} pages)",
                    summary.path.display(),
                    summary.pages
                );
                if summary.skipped_images > 0 {
                    self.notice = Some(format!(
                        "{} image(s) could not be read and were omitted from the export.",
                        summary.skipped_images
                    ));
                }
                Task::none()
            }
            Message::ExportFinished(Err(error)) => {
                // Export failure never affects navigation or rendering
                self.status = "Export failed.".to_string();
                self.notice = Some(format!("Export failed: {error}"));
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
            Message::Tick(now) => {
                self.starfield.tick(now);
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window = size;
                if size.width >= ui::nav_bar::NARROW_WIDTH {
                    self.nav.menu_open = false;
                }
                Task::none()
            }
        }
    }

    /// Post-transition bookkeeping: re-register reveal sections for the
    /// new page, snap the viewport to the origin (instant, consistently),
    /// and schedule the deferred reveal sweep for the next tick - a
    /// section already inside the viewport gets no scroll event to
    /// reveal it otherwise.
    fn after_page_switch(&mut self) -> Task<Message> {
        self.register_sections();
        self.nav.scroll_top = 0.0;
        Task::batch([
            scrollable::scroll_to(scroll_id(), AbsoluteOffset { x: 0.0, y: 0.0 }),
            Task::perform(std::future::ready(()), |_| Message::RevealSweep),
        ])
    }

    /// Register the current page's reveal sections at their nominal
    /// positions. Already-revealed sections keep their state.
    fn register_sections(&mut self) {
        let grid_height = |count: usize| {
            let rows = count.div_ceil(3).max(1) as f32;
            rows * 330.0
        };

        let sections: Vec<(&str, f32, f32)> = match self.nav.current() {
            Page::Home => vec![
                ("home/hero", 0.0, 420.0),
                (
                    "home/featured",
                    440.0,
                    60.0 + grid_height(self.catalog.featured_len()),
                ),
            ],
            Page::Projects => vec![
                ("projects/heading", 0.0, 120.0),
                ("projects/grid", 140.0, grid_height(self.catalog.len())),
            ],
            Page::About => vec![
                ("about/story", 0.0, 280.0),
                ("about/capabilities", 300.0, 320.0),
            ],
            Page::Contact => vec![
                ("contact/intro", 0.0, 200.0),
                ("contact/channels", 220.0, 240.0),
            ],
            Page::ProjectDetail => vec![("detail/gallery", 700.0, 260.0)],
        };

        for (id, top, height) in sections {
            self.reveal.register(id, top, height);
        }
    }

    /// How many tiles the keyboard focus ring cycles over on this page
    fn visible_card_count(&self) -> usize {
        match self.nav.current() {
            Page::Home => self.catalog.featured_len(),
            Page::Projects => self.catalog.len(),
            _ => 0,
        }
    }

    fn detail_record(&self) -> Option<(usize, &state::catalog::ProjectRecord)> {
        let index = self.nav.detail?;
        self.catalog.get(index).map(|r| (index, r))
    }

    /// Pick a destination with the native save dialog, then run the
    /// export as a background task. Concurrent exports are not
    /// deduplicated; the last writer wins on a shared filename.
    fn start_export(
        &mut self,
        blocks: Vec<plan::Block>,
        doc_title: String,
        default_filename: &str,
    ) -> Task<Message> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Export PDF")
            .set_file_name(default_filename)
            .add_filter("PDF", &["pdf"]);
        if let Some(downloads) = dirs::download_dir() {
            dialog = dialog.set_directory(downloads);
        }

        match dialog.save_file() {
            Some(path) => {
                self.status = format!("Exporting {doc_title}…");
                Task::perform(export::run_export(blocks, doc_title, path), |result| {
                    Message::ExportFinished(result.map_err(|e| e.to_string()))
                })
            }
            None => {
                self.status = "Export cancelled.".to_string();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.nav.current() {
            Page::Home => self.home_view(),
            Page::Projects => self.projects_view(),
            Page::About => self.about_view(),
            Page::Contact => self.contact_view(),
            Page::ProjectDetail => self.detail_view(),
        };

        let body = scrollable::Scrollable::new(
            container(page).width(Length::Fill).padding([18.0, 24.0]),
        )
        .id(scroll_id())
        .on_scroll(Message::BodyScrolled)
        .width(Length::Fill)
        .height(Length::Fill);

        let mut chrome = column![ui::nav_bar::nav_bar(&self.nav, self.window.width)];
        if let Some(notice) = &self.notice {
            chrome = chrome.push(self.notice_banner(notice));
        }
        chrome = chrome.push(body).push(
            container(text(&self.status).size(12).color(theme::muted())).padding([4.0, 14.0]),
        );

        let base: Element<Message> = stack![
            canvas(&self.starfield)
                .width(Length::Fill)
                .height(Length::Fill),
            chrome,
        ]
        .into();

        // Lightbox overlay, when open over a presented record
        match (&self.nav.lightbox, self.detail_record()) {
            (Some(lb), Some((_, record))) => ui::lightbox::overlay(base, record, lb.image_index),
            _ => base,
        }
    }

    fn notice_banner<'a>(&self, notice: &'a str) -> Element<'a, Message> {
        container(
            row![
                text(notice).size(13),
                button(text("Dismiss").size(12)).on_press(Message::DismissNotice),
            ]
            .spacing(16)
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding([8.0, 14.0])
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().danger.weak.color.into()),
            ..container::Style::default()
        })
        .into()
    }

    fn home_view(&self) -> Element<Message> {
        let hero = column![
            text("Aerospace Engineering Portfolio").size(40),
            text("Mission software, analysis, and flight hardware projects.")
                .size(16)
                .color(theme::muted()),
            row![
                button(text("View Projects").size(14))
                    .padding([10.0, 18.0])
                    .on_press(Message::Navigate(Page::Projects.fragment().to_string())),
                button(text("Get in Touch").size(14))
                    .padding([10.0, 18.0])
                    .on_press(Message::Navigate(Page::Contact.fragment().to_string())),
            ]
            .spacing(12),
        ]
        .spacing(18)
        .padding([60.0, 0.0]);

        let featured = column![
            text("Featured Projects").size(24),
            ui::cards::card_grid(self.catalog.featured(), self.nav.focused_card),
        ]
        .spacing(16);

        column![
            ui::reveal_section(&self.reveal, "home/hero", 420.0, hero.into()),
            ui::reveal_section(&self.reveal, "home/featured", 400.0, featured.into()),
        ]
        .spacing(24)
        .into()
    }

    fn projects_view(&self) -> Element<Message> {
        let heading = column![
            text("All Projects").size(30),
            text("Everything in the catalog, in order.")
                .size(14)
                .color(theme::muted()),
            row![button(text("Export All (PDF)").size(13))
                .padding([8.0, 14.0])
                .on_press(Message::ExportPortfolio)],
        ]
        .spacing(10);

        let grid = ui::cards::card_grid(self.catalog.all(), self.nav.focused_card);

        column![
            ui::reveal_section(&self.reveal, "projects/heading", 120.0, heading.into()),
            ui::reveal_section(&self.reveal, "projects/grid", 400.0, grid),
        ]
        .spacing(20)
        .into()
    }

    fn about_view(&self) -> Element<Message> {
        let story = column![
            text("About").size(30),
            text(
                "Aerospace engineer working across mission software, thermal \
                 analysis, and test. This portfolio collects the projects I can \
                 talk about publicly."
            )
            .size(15),
        ]
        .spacing(12);

        let capabilities = column![
            text("Capabilities").size(22),
            text("· Ground-segment and telemetry software").size(14),
            text("· Thermal and structural analysis").size(14),
            text("· CFD automation and post-processing").size(14),
            text("· Flight test data pipelines").size(14),
        ]
        .spacing(8);

        column![
            ui::reveal_section(&self.reveal, "about/story", 280.0, story.into()),
            ui::reveal_section(&self.reveal, "about/capabilities", 320.0, capabilities.into()),
        ]
        .spacing(28)
        .into()
    }

    fn contact_view(&self) -> Element<Message> {
        let intro = column![
            text("Contact").size(30),
            text("Happy to talk about mission software and analysis work.")
                .size(15)
                .color(theme::muted()),
        ]
        .spacing(12);

        let channels = column![
            text("✉  portfolio@example.com").size(15),
            text("🛰  github.com/example").size(15),
        ]
        .spacing(8);

        column![
            ui::reveal_section(&self.reveal, "contact/intro", 200.0, intro.into()),
            ui::reveal_section(&self.reveal, "contact/channels", 240.0, channels.into()),
        ]
        .spacing(28)
        .into()
    }

    fn detail_view(&self) -> Element<Message> {
        match self.detail_record() {
            Some((index, record)) => {
                ui::detail::detail_view(record, index, self.nav.detail_accent, &self.reveal)
            }
            // The detail page needs its record supplied programmatically;
            // a deep link can land here without one
            None => column![
                text("No project selected.").size(18),
                button(text("Browse projects").size(14))
                    .on_press(Message::Navigate(Page::Projects.fragment().to_string())),
            ]
            .spacing(14)
            .padding(40)
            .into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        theme::theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            keyboard::on_key_press(handle_key),
            event::listen_with(|event, _status, _window| match event {
                Event::Window(window::Event::Resized(size)) => {
                    Some(Message::WindowResized(size))
                }
                _ => None,
            }),
        ];

        // The star field only asks for frames while its stop token is set
        if self.starfield.running() {
            subscriptions.push(window::frames().map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }
}

fn handle_key(key: Key, modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Escape) => Some(Message::EscapePressed),
        Key::Named(Named::Tab) => Some(Message::FocusMoved {
            backward: modifiers.shift(),
        }),
        Key::Named(Named::Enter) => Some(Message::ActivateFocused),
        _ => None,
    }
}

fn main() -> iced::Result {
    iced::application("Starfolio", Starfolio::update, Starfolio::view)
        .subscription(Starfolio::subscription)
        .theme(Starfolio::theme)
        .window_size((1100.0, 760.0))
        .centered()
        .run_with(Starfolio::new)
}
