//! Fixed navbar and section anchors.

use std::collections::HashMap;

use vista_core::{
    AnimatedValue, AnimationSpec, Color, Easing, MotionState, Rect, Signal, Tween, now, signal,
};
use web_time::{Duration, Instant};

use crate::config::{SectionId, SiteConfig};

/// Navbar background once the page has scrolled (white at 95%).
pub const SCROLLED_BACKGROUND: Color = Color::from_rgba(255, 255, 255, 242);

/// Laid-out rects of the page sections, keyed by section.
#[derive(Clone, Debug, Default)]
pub struct SectionAnchors {
    rects: HashMap<SectionId, Rect>,
}

impl SectionAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: SectionId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn rect(&self, id: SectionId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Scroll offset that brings the top of the section to the top of the
    /// viewport.
    pub fn scroll_target(&self, id: SectionId) -> Option<f32> {
        self.rect(id).map(|r| r.y.max(0.0))
    }
}

#[derive(Clone, Debug)]
pub struct NavItem {
    pub id: SectionId,
    pub title: String,
    entrance: Tween<MotionState>,
}

pub struct Navbar {
    threshold: f32,
    scrolled: Signal<bool>,
    background: AnimatedValue<Color>,
    mounted_at: Instant,
    bar: Tween<MotionState>,
    items: Vec<NavItem>,
    book_visit: Tween<MotionState>,
    menu_open: bool,
}

impl std::fmt::Debug for Navbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navbar")
            .field("scrolled", &self.scrolled.get())
            .field("items", &self.items.len())
            .field("menu_open", &self.menu_open)
            .finish()
    }
}

impl Navbar {
    pub fn new(config: &SiteConfig) -> Self {
        let item_tween = AnimationSpec::tween(Duration::from_millis(300), Easing::EaseOut);
        let items = config
            .nav_sections()
            .enumerate()
            .map(|(i, section)| NavItem {
                id: section.id,
                title: section.title.clone(),
                entrance: Tween::new(
                    MotionState::HIDDEN.with_offset(0.0, -20.0),
                    MotionState::VISIBLE,
                    item_tween.with_delay(Duration::from_millis(100 * i as u64)),
                ),
            })
            .collect();

        Self {
            threshold: config.timing.navbar_scroll_threshold_px,
            scrolled: signal(false),
            background: AnimatedValue::new(
                Color::TRANSPARENT,
                AnimationSpec::tween(Duration::from_millis(300), Easing::EaseInOut),
            ),
            mounted_at: now(),
            bar: Tween::new(
                MotionState::VISIBLE.with_offset(0.0, -100.0),
                MotionState::VISIBLE,
                AnimationSpec::spring(),
            ),
            items,
            book_visit: Tween::new(
                MotionState::HIDDEN.with_scale(0.8),
                MotionState::VISIBLE,
                item_tween.with_delay(Duration::from_millis(600)),
            ),
            menu_open: false,
        }
    }

    /// Feeds the page scroll offset. Returns `true` when the scrolled state
    /// flipped.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y > self.threshold;
        if !self.scrolled.set_if_changed(scrolled) {
            return false;
        }
        self.background.set_target(if scrolled {
            SCROLLED_BACKGROUND
        } else {
            Color::TRANSPARENT
        });
        true
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn scrolled_signal(&self) -> Signal<bool> {
        self.scrolled.clone()
    }

    pub fn background(&mut self) -> Color {
        self.background.update();
        *self.background.get()
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    fn since_mount(&self) -> Duration {
        now().saturating_duration_since(self.mounted_at)
    }

    /// Slide-down entrance of the bar itself.
    pub fn bar_motion(&self) -> MotionState {
        self.bar.sample(self.since_mount())
    }

    pub fn item_motion(&self, index: usize) -> Option<MotionState> {
        let elapsed = self.since_mount();
        self.items.get(index).map(|item| item.entrance.sample(elapsed))
    }

    pub fn book_visit_motion(&self) -> MotionState {
        self.book_visit.sample(self.since_mount())
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Resolves a nav click to a scroll target. The mobile menu closes only
    /// when the section exists.
    pub fn navigate(&mut self, id: SectionId, anchors: &SectionAnchors) -> Option<f32> {
        let Some(target) = anchors.scroll_target(id) else {
            log::warn!("no anchor for section {:?}", id);
            return None;
        };
        self.menu_open = false;
        Some(target)
    }

    pub fn book_visit(&mut self, anchors: &SectionAnchors) -> Option<f32> {
        self.navigate(SectionId::Contact, anchors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::TestClock;

    #[test]
    fn scrolled_past_threshold() {
        let clock = TestClock::install();
        let mut nav = Navbar::new(&SiteConfig::default());
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(50.5));
        assert!(nav.is_scrolled());
        assert!(!nav.on_scroll(400.0));

        clock.advance(Duration::from_millis(300));
        assert_eq!(nav.background(), SCROLLED_BACKGROUND);

        assert!(nav.on_scroll(0.0));
        clock.advance(Duration::from_millis(300));
        assert_eq!(nav.background(), Color::TRANSPARENT);
    }

    #[test]
    fn items_enter_in_order() {
        let clock = TestClock::install();
        let nav = Navbar::new(&SiteConfig::default());
        let titles: Vec<&str> = nav.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Home", "About", "Amenities", "Colleges", "Location", "Contact"]
        );

        clock.advance(Duration::from_millis(250));
        let first = nav.item_motion(0).unwrap();
        let last = nav.item_motion(5).unwrap();
        assert!(first.opacity > 0.0);
        assert_eq!(last.opacity, 0.0);
        assert_eq!(nav.item_motion(6), None);

        clock.advance(Duration::from_secs(2));
        assert_eq!(nav.item_motion(5), Some(MotionState::VISIBLE));
        assert_eq!(nav.bar_motion(), MotionState::VISIBLE);
        assert_eq!(nav.book_visit_motion(), MotionState::VISIBLE);
    }

    #[test]
    fn navigate_closes_menu_only_on_hit() {
        let _clock = TestClock::install();
        let mut nav = Navbar::new(&SiteConfig::default());
        let mut anchors = SectionAnchors::new();
        anchors.register(SectionId::Contact, Rect::new(0.0, 5200.0, 1280.0, 900.0));

        assert!(nav.toggle_menu());
        assert_eq!(nav.navigate(SectionId::Location, &anchors), None);
        assert!(nav.is_menu_open());
        assert_eq!(nav.book_visit(&anchors), Some(5200.0));
        assert!(!nav.is_menu_open());
    }
}
