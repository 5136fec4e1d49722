/// Page-state and navigation synchronization.
///
/// This module owns the "current page" state machine: which page is active,
/// the fragment string mirroring it (the desktop analog of the original
/// site's URL hash), the collapsible menu, the card focus ring, and the
/// lightbox overlay. Views read this state; only the update loop mutates it.

/// The registry of named pages. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Projects,
    About,
    Contact,
    /// Detail surface for one project. Has no nav indicator of its own:
    /// it lights up the Projects entry instead.
    ProjectDetail,
}

impl Page {
    /// Pages that appear as navigation entries, in display order
    pub const NAV_ENTRIES: [Page; 4] = [Page::Home, Page::Projects, Page::About, Page::Contact];

    /// The fragment identifier for this page (the URL-hash analog)
    pub fn fragment(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Projects => "projects",
            Page::About => "about",
            Page::Contact => "contact",
            Page::ProjectDetail => "project-detail",
        }
    }

    /// Resolve a fragment identifier. Unknown fragments resolve to None;
    /// callers decide whether that means "ignore" or "default to home".
    pub fn from_fragment(fragment: &str) -> Option<Page> {
        match fragment {
            "home" => Some(Page::Home),
            "projects" => Some(Page::Projects),
            "about" => Some(Page::About),
            "contact" => Some(Page::Contact),
            "project-detail" => Some(Page::ProjectDetail),
            _ => None,
        }
    }

    /// Which nav entry should show as active while this page is current.
    /// Detail pages map onto their parent listing section.
    pub fn indicator(self) -> Page {
        match self {
            Page::ProjectDetail => Page::Projects,
            other => other,
        }
    }

    /// Human-readable label for the nav bar
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::About => "About",
            Page::Contact => "Contact",
            Page::ProjectDetail => "Project",
        }
    }
}

/// The open lightbox overlay, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    /// Index into the presented record's gallery
    pub image_index: usize,
    /// Content scroll offset to restore when the lightbox closes
    pub restore_scroll: f32,
}

/// Process-wide navigation state. Mutated only by the update loop.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: Page,
    /// Mirror of `current` as a fragment string. Updated with replace
    /// semantics on every transition - there is no history stack to push to.
    fragment: String,
    /// Collapsible menu shown at narrow window widths
    pub menu_open: bool,
    /// Keyboard focus ring over the visible card grid (display index)
    pub focused_card: Option<usize>,
    /// Catalog index of the record shown on the detail page
    pub detail: Option<usize>,
    /// Tile index the record was activated from; keys the fallback gradient
    pub detail_accent: usize,
    pub lightbox: Option<Lightbox>,
    /// Current content scroll offset, fed by the scrollable's on_scroll
    pub scroll_top: f32,
}

impl NavigationState {
    /// Initial state from an optional deep-link fragment (the analog of the
    /// URL hash at load). Absent or unrecognized defaults to home.
    pub fn new(initial_fragment: Option<&str>) -> Self {
        let current = initial_fragment
            .and_then(Page::from_fragment)
            .unwrap_or(Page::Home);

        NavigationState {
            current,
            fragment: current.fragment().to_string(),
            menu_open: false,
            focused_card: None,
            detail: None,
            detail_accent: 0,
            lightbox: None,
            scroll_top: 0.0,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Switch to the page named by `target`.
    ///
    /// Unknown targets are silently ignored and the previous page stays
    /// active - a tolerance policy, not an error path; stale links must
    /// never break the view. Returns whether a transition happened so the
    /// caller can schedule the scroll reset and reveal re-arm.
    pub fn switch_page(&mut self, target: &str) -> bool {
        let Some(page) = Page::from_fragment(target) else {
            return false;
        };

        self.current = page;
        self.fragment.clear();
        self.fragment.push_str(page.fragment());
        self.menu_open = false;
        self.focused_card = None;
        self.lightbox = None;
        true
    }

    /// Whether the nav entry for `entry` should render as active
    pub fn indicator_active(&self, entry: Page) -> bool {
        self.current.indicator() == entry
    }

    /// Present one record on the detail page. `accent` is the tile index
    /// the record was activated from, which keys its fallback gradient.
    pub fn present(&mut self, record: usize, accent: usize) {
        self.detail = Some(record);
        self.detail_accent = accent;
        self.switch_page(Page::ProjectDetail.fragment());
    }

    /// The back control: a fixed transition to the listing page, not a
    /// history pop. The presented record is cleared.
    pub fn back_to_listing(&mut self) {
        self.detail = None;
        self.switch_page(Page::Projects.fragment());
    }

    /// Open the lightbox over the current detail page, remembering the
    /// scroll offset so closing can restore it
    pub fn open_lightbox(&mut self, image_index: usize) {
        self.lightbox = Some(Lightbox {
            image_index,
            restore_scroll: self.scroll_top,
        });
    }

    /// Close the lightbox, returning the scroll offset to restore
    pub fn close_lightbox(&mut self) -> Option<f32> {
        self.lightbox.take().map(|lb| lb.restore_scroll)
    }

    /// Move the card focus ring forward or backward over `count` tiles
    pub fn move_focus(&mut self, count: usize, backward: bool) {
        if count == 0 {
            self.focused_card = None;
            return;
        }
        self.focused_card = Some(match (self.focused_card, backward) {
            (None, false) => 0,
            (None, true) => count - 1,
            (Some(i), false) => (i + 1) % count,
            (Some(i), true) => (i + count - 1) % count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fragment_defaults_to_home() {
        assert_eq!(NavigationState::new(None).current(), Page::Home);
        assert_eq!(NavigationState::new(Some("warp-drive")).current(), Page::Home);
        assert_eq!(
            NavigationState::new(Some("projects")).current(),
            Page::Projects
        );
    }

    #[test]
    fn test_switch_page_known_targets() {
        let mut nav = NavigationState::new(None);
        for page in [
            Page::Home,
            Page::Projects,
            Page::About,
            Page::Contact,
            Page::ProjectDetail,
        ] {
            assert!(nav.switch_page(page.fragment()));
            assert_eq!(nav.current(), page, "exactly one page active");
            assert_eq!(nav.fragment(), page.fragment(), "fragment mirrors state");
        }
    }

    #[test]
    fn test_switch_page_unknown_is_noop() {
        let mut nav = NavigationState::new(Some("about"));
        nav.menu_open = true;

        assert!(!nav.switch_page("launchpad"));
        assert_eq!(nav.current(), Page::About, "previous page stays active");
        assert_eq!(nav.fragment(), "about", "fragment unchanged");
        assert!(nav.menu_open, "no side effects on a rejected transition");
    }

    #[test]
    fn test_detail_lights_parent_indicator() {
        let mut nav = NavigationState::new(None);
        nav.present(2, 1);

        assert_eq!(nav.current(), Page::ProjectDetail);
        assert!(nav.indicator_active(Page::Projects));
        for other in [Page::Home, Page::About, Page::Contact] {
            assert!(!nav.indicator_active(other), "{other:?} must not be active");
        }
    }

    #[test]
    fn test_switch_collapses_menu_and_focus() {
        let mut nav = NavigationState::new(None);
        nav.menu_open = true;
        nav.focused_card = Some(3);

        nav.switch_page("projects");
        assert!(!nav.menu_open);
        assert_eq!(nav.focused_card, None);
    }

    #[test]
    fn test_back_returns_to_fixed_listing() {
        let mut nav = NavigationState::new(None);
        nav.present(4, 0);
        nav.back_to_listing();

        assert_eq!(nav.current(), Page::Projects);
        assert_eq!(nav.detail, None);
    }

    #[test]
    fn test_lightbox_restores_scroll() {
        let mut nav = NavigationState::new(None);
        nav.present(0, 0);
        nav.scroll_top = 412.5;

        nav.open_lightbox(1);
        nav.scroll_top = 0.0; // whatever happened while the overlay was up
        let restored = nav.close_lightbox();

        assert_eq!(restored, Some(412.5));
        assert_eq!(nav.lightbox, None);
        assert_eq!(nav.close_lightbox(), None, "second close is a no-op");
    }

    #[test]
    fn test_focus_ring_wraps() {
        let mut nav = NavigationState::new(None);
        nav.move_focus(3, false);
        assert_eq!(nav.focused_card, Some(0));
        nav.move_focus(3, true);
        assert_eq!(nav.focused_card, Some(2));
        nav.move_focus(3, false);
        assert_eq!(nav.focused_card, Some(0));

        nav.move_focus(0, false);
        assert_eq!(nav.focused_card, None, "no tiles, no focus");
    }
}
