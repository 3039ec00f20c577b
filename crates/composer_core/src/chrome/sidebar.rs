use std::time::{Duration, Instant};

use tracing::debug;

/// Viewports at or below this width show the sidebar as an overlay.
pub const MOBILE_BREAKPOINT: f32 = 768.0;
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Delay between a menu-item click in the overlay and the overlay closing.
pub const NAVIGATION_CLOSE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    collapsed: bool,
    mobile_open: bool,
    close_at: Option<Instant>,
}

impl SidebarState {
    pub fn is_mobile(viewport_width: f32) -> bool {
        viewport_width <= MOBILE_BREAKPOINT
    }

    /// Wide viewports collapse/expand in place; narrow ones open or close
    /// the overlay.
    pub fn toggle(&mut self, viewport_width: f32) {
        if Self::is_mobile(viewport_width) {
            self.mobile_open = !self.mobile_open;
        } else {
            self.collapsed = !self.collapsed;
        }
        debug!(
            collapsed = self.collapsed,
            mobile_open = self.mobile_open,
            "sidebar toggled"
        );
    }

    /// Backdrop click or Escape.
    pub fn close_overlay(&mut self) {
        self.mobile_open = false;
        self.close_at = None;
    }

    /// A click that landed outside the sidebar and its toggle. Only wide
    /// viewports react; narrow ones close through the backdrop.
    pub fn on_click_outside(&mut self, viewport_width: f32) {
        if !Self::is_mobile(viewport_width) && !self.collapsed {
            debug!(viewport_width, "collapsing sidebar after outside click");
            self.collapsed = true;
        }
    }

    /// A menu item inside the open overlay was clicked. The overlay closes
    /// once [`NAVIGATION_CLOSE_DELAY`] has passed; see [`Self::poll`].
    pub fn on_navigate(&mut self, now: Instant, viewport_width: f32) {
        if Self::is_mobile(viewport_width) && self.mobile_open {
            self.close_at = Some(now + NAVIGATION_CLOSE_DELAY);
        }
    }

    /// Applies a scheduled overlay close. Returns `true` when it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.close_at {
            Some(deadline) if now >= deadline => {
                debug!("closing sidebar overlay after navigation");
                self.close_overlay();
                true
            }
            _ => false,
        }
    }

    pub fn has_scheduled_close(&self) -> bool {
        self.close_at.is_some()
    }

    pub fn on_resize(&mut self, viewport_width: f32) {
        if !Self::is_mobile(viewport_width) && self.mobile_open {
            debug!(viewport_width, "closing sidebar overlay after widening");
            self.mobile_open = false;
        }
    }

    pub fn is_visible(&self, viewport_width: f32) -> bool {
        if Self::is_mobile(viewport_width) {
            self.mobile_open
        } else {
            !self.collapsed
        }
    }

    pub fn shows_backdrop(&self, viewport_width: f32) -> bool {
        Self::is_mobile(viewport_width) && self.mobile_open
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

/// Trailing-edge debounce for viewport resizes: only the last width of a
/// burst is reported, once the burst has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Instant, f32)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn notify(&mut self, now: Instant, viewport_width: f32) {
        self.pending = Some((now + self.delay, viewport_width));
    }

    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        match self.pending {
            Some((deadline, width)) if now >= deadline => {
                self.pending = None;
                Some(width)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_toggle_collapses_in_place() {
        let mut sidebar = SidebarState::default();
        assert!(sidebar.is_visible(1280.0));
        sidebar.toggle(1280.0);
        assert!(sidebar.is_collapsed());
        assert!(!sidebar.is_visible(1280.0));
        assert!(!sidebar.shows_backdrop(1280.0));
    }

    #[test]
    fn narrow_toggle_opens_overlay_with_backdrop() {
        let mut sidebar = SidebarState::default();
        assert!(!sidebar.is_visible(600.0));
        sidebar.toggle(600.0);
        assert!(sidebar.is_visible(600.0));
        assert!(sidebar.shows_backdrop(600.0));
        assert!(!sidebar.is_collapsed());

        sidebar.close_overlay();
        assert!(!sidebar.is_visible(600.0));
    }

    #[test]
    fn widening_closes_overlay() {
        let mut sidebar = SidebarState::default();
        sidebar.toggle(MOBILE_BREAKPOINT);
        sidebar.on_resize(700.0);
        assert!(sidebar.is_visible(700.0));

        sidebar.on_resize(1024.0);
        sidebar.on_resize(700.0);
        assert!(!sidebar.is_visible(700.0));
    }

    #[test]
    fn outside_click_collapses_only_wide_sidebar() {
        let mut sidebar = SidebarState::default();
        sidebar.on_click_outside(1280.0);
        assert!(sidebar.is_collapsed());
        assert!(!sidebar.is_visible(1280.0));

        let mut narrow = SidebarState::default();
        narrow.toggle(600.0);
        narrow.on_click_outside(600.0);
        assert!(narrow.is_visible(600.0));
        assert!(!narrow.is_collapsed());
    }

    #[test]
    fn navigation_closes_overlay_after_delay() {
        let start = Instant::now();
        let mut sidebar = SidebarState::default();
        sidebar.toggle(600.0);

        sidebar.on_navigate(start, 600.0);
        assert!(sidebar.has_scheduled_close());
        assert!(!sidebar.poll(start + Duration::from_millis(150)));
        assert!(sidebar.is_visible(600.0));

        assert!(sidebar.poll(start + NAVIGATION_CLOSE_DELAY));
        assert!(!sidebar.is_visible(600.0));
        assert!(!sidebar.has_scheduled_close());
        assert!(!sidebar.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn navigation_on_wide_viewport_schedules_nothing() {
        let start = Instant::now();
        let mut sidebar = SidebarState::default();
        sidebar.on_navigate(start, 1280.0);
        assert!(!sidebar.has_scheduled_close());
        assert!(!sidebar.poll(start + Duration::from_secs(1)));
        assert!(sidebar.is_visible(1280.0));
    }

    #[test]
    fn debouncer_reports_last_width_once() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(250));

        debouncer.notify(start, 900.0);
        debouncer.notify(start + Duration::from_millis(100), 700.0);
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(350)),
            Some(700.0)
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
        assert!(!debouncer.is_pending());
    }
}
