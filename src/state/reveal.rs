/// Viewport-entry reveal tracking.
///
/// Sections register with their approximate position in the scrolled
/// content; the first time at least 12% of a section intersects the
/// viewport it is marked visible and stays visible forever. This is a
/// one-way transition per section, never a toggle, so reveal animations
/// fire exactly once no matter how much the user scrolls afterwards.
use std::collections::HashMap;

/// Fraction of a section's height that must intersect the viewport
/// before it reveals
pub const REVEAL_THRESHOLD: f32 = 0.12;

#[derive(Debug, Clone)]
struct Entry {
    top: f32,
    height: f32,
    visible: bool,
}

/// One-shot visibility tracker for scroll-revealed sections
#[derive(Debug, Default)]
pub struct RevealTracker {
    entries: HashMap<String, Entry>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section at `top` with the given `height` (content
    /// coordinates, in points from the top of the scrolled content).
    ///
    /// Safe to call again after a page switch: an already-registered
    /// section keeps its visibility and only its geometry is refreshed,
    /// while sections new to this page are picked up.
    pub fn register(&mut self, id: &str, top: f32, height: f32) {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.top = top;
                entry.height = height;
            }
            None => {
                self.entries.insert(
                    id.to_string(),
                    Entry {
                        top,
                        height,
                        visible: false,
                    },
                );
            }
        }
    }

    /// Re-evaluate which sections intersect the viewport and mark them
    /// visible. Returns how many newly revealed. Never un-reveals.
    pub fn sweep(&mut self, scroll_top: f32, viewport_height: f32) -> usize {
        let view_bottom = scroll_top + viewport_height;
        let mut revealed = 0;

        for entry in self.entries.values_mut() {
            if entry.visible || entry.height <= 0.0 {
                continue;
            }
            let overlap =
                (entry.top + entry.height).min(view_bottom) - entry.top.max(scroll_top);
            if overlap / entry.height >= REVEAL_THRESHOLD {
                entry.visible = true;
                revealed += 1;
            }
        }

        revealed
    }

    /// Whether a section has been revealed. Unregistered sections render
    /// visible so a missed registration degrades to "no animation" rather
    /// than hidden content.
    pub fn is_visible(&self, id: &str) -> bool {
        self.entries.get(id).map(|e| e.visible).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_on_threshold_intersection() {
        let mut tracker = RevealTracker::new();
        tracker.register("hero", 0.0, 400.0);
        tracker.register("below-fold", 2000.0, 400.0);

        let revealed = tracker.sweep(0.0, 800.0);
        assert_eq!(revealed, 1);
        assert!(tracker.is_visible("hero"));
        assert!(!tracker.is_visible("below-fold"));
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut tracker = RevealTracker::new();
        tracker.register("grid", 500.0, 300.0);

        tracker.sweep(400.0, 800.0);
        assert!(tracker.is_visible("grid"));

        // Scrolling far away never hides it again
        for scroll in [0.0, 5000.0, 123.0] {
            tracker.sweep(scroll, 800.0);
            assert!(tracker.is_visible("grid"));
        }
    }

    #[test]
    fn test_below_threshold_stays_hidden() {
        let mut tracker = RevealTracker::new();
        // 40 of 400 points visible = 10%, just under the 12% threshold
        tracker.register("teaser", 760.0, 400.0);

        assert_eq!(tracker.sweep(0.0, 800.0), 0);
        assert!(!tracker.is_visible("teaser"));

        // A little more scroll crosses the threshold
        assert_eq!(tracker.sweep(20.0, 800.0), 1);
        assert!(tracker.is_visible("teaser"));
    }

    #[test]
    fn test_reregistration_preserves_visibility() {
        let mut tracker = RevealTracker::new();
        tracker.register("featured", 100.0, 300.0);
        tracker.sweep(0.0, 800.0);
        assert!(tracker.is_visible("featured"));

        // Page switch re-registers existing sections and adds a new one
        tracker.register("featured", 150.0, 300.0);
        tracker.register("contact-form", 3000.0, 200.0);

        assert!(tracker.is_visible("featured"), "no double-register reset");
        assert!(!tracker.is_visible("contact-form"));
    }

    #[test]
    fn test_unregistered_sections_render_visible() {
        let tracker = RevealTracker::new();
        assert!(tracker.is_visible("anything"));
    }
}
