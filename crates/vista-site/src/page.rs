//! The whole property page: every section's reveals wired to one
//! `ViewportWatcher`, plus the gallery, contact surfaces, navbar and
//! ambient decoration, all owned by one root `Scope`.

use vista_core::{MotionState, Rect, Scope, run_due_timers};
use vista_motion::{
    DecorativeFrame, DecorativeLayer, Gallery, GalleryConfig, ObserveOptions, RegionWatch,
    RevealGroup, RevealSpec, ScrollLock, Viewport, ViewportWatcher,
};
use web_time::Duration;

use crate::config::{SectionId, SiteConfig};
use crate::contact::{ContactForm, ContactRequest, Field, FormVariant};
use crate::error::SiteError;
use crate::nav::{Navbar, SectionAnchors};
use crate::notify::Toaster;
use crate::popup::ContactPopup;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn rise(px: f32) -> RevealSpec {
    RevealSpec::fade_up().with_from(MotionState::HIDDEN.with_offset(0.0, px))
}

/// A named piece of a section that reveals together (a heading, a card grid).
#[derive(Clone, Debug)]
pub struct RevealPart {
    pub name: &'static str,
    pub group: RevealGroup,
}

impl RevealPart {
    fn single(name: &'static str, spec: RevealSpec) -> Self {
        Self {
            name,
            group: RevealGroup::new(spec, 1, Duration::ZERO),
        }
    }

    fn staggered(name: &'static str, spec: RevealSpec, count: usize, stagger: Duration) -> Self {
        Self {
            name,
            group: RevealGroup::new(spec, count, stagger),
        }
    }
}

/// Reveal choreography for a section.
fn section_parts(id: SectionId, config: &SiteConfig) -> Vec<RevealPart> {
    let heading = || RevealPart::single("heading", RevealSpec::fade_up());
    let left = || RevealPart::single("left", RevealSpec::slide_from_left());
    let right = || RevealPart::single("right", RevealSpec::slide_from_right().with_delay(ms(200)));

    match id {
        SectionId::Home => vec![RevealPart::single(
            "heading",
            RevealSpec::fade_up().with_duration(ms(800)),
        )],
        SectionId::About => vec![
            left(),
            right(),
            RevealPart::staggered("highlights", rise(20.0).with_delay(ms(400)), 3, ms(200)),
        ],
        SectionId::Amenities => vec![
            heading(),
            RevealPart::staggered(
                "cards",
                rise(30.0).with_duration(ms(500)),
                config.amenities.len(),
                ms(50),
            ),
        ],
        SectionId::Colleges => vec![
            heading(),
            RevealPart::staggered(
                "cards",
                RevealSpec::fade_up()
                    .with_from(MotionState::HIDDEN.with_offset(0.0, 30.0).with_scale(0.9))
                    .with_duration(ms(500)),
                config.colleges.len(),
                ms(100),
            ),
            RevealPart::single("note", rise(20.0).with_delay(ms(800))),
        ],
        SectionId::Gallery => vec![heading()],
        SectionId::Location => vec![
            heading(),
            left(),
            right(),
            RevealPart::single("details", rise(20.0).with_delay(ms(400))),
        ],
        SectionId::Contact => vec![heading(), left(), right()],
    }
}

#[derive(Clone, Debug)]
pub struct SectionMotion {
    pub id: SectionId,
    pub region: RegionWatch,
    pub parts: Vec<RevealPart>,
}

impl SectionMotion {
    pub fn part(&self, name: &str) -> Option<&RevealGroup> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.group)
    }

    /// Current motion of every element of a part.
    pub fn sample(&self, name: &str) -> Option<Vec<MotionState>> {
        self.part(name).map(RevealGroup::sample)
    }

    pub fn is_settled(&self) -> bool {
        self.parts.iter().all(|p| p.group.is_settled())
    }
}

pub struct Page {
    config: SiteConfig,
    scope: Scope,
    watcher: ViewportWatcher,
    sections: Vec<SectionMotion>,
    anchors: SectionAnchors,
    navbar: Navbar,
    scroll_lock: ScrollLock,
    gallery: Option<Gallery>,
    popup: ContactPopup,
    contact: ContactForm,
    toaster: Toaster,
    decorative: DecorativeLayer,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.config.name)
            .field("sections", &self.sections.len())
            .field("viewport", &self.watcher.viewport())
            .field("mounted", &!self.scope.is_disposed())
            .finish()
    }
}

impl Page {
    pub fn mount(config: SiteConfig, viewport: Viewport) -> Result<Self, SiteError> {
        config.validate()?;
        let scope = Scope::new();
        let watcher = ViewportWatcher::new();
        watcher.set_viewport(viewport);

        let sections = config
            .sections
            .iter()
            .map(|section| {
                let region = watcher.observe_in(&scope, ObserveOptions::default());
                let parts = section_parts(section.id, &config);
                for part in &parts {
                    if section.id == SectionId::Home {
                        // The hero plays on load, not on scroll.
                        part.group.trigger();
                    } else {
                        part.group.bind_in(&scope, &region);
                    }
                }
                SectionMotion {
                    id: section.id,
                    region,
                    parts,
                }
            })
            .collect();

        let scroll_lock = ScrollLock::new();
        let gallery = if config.has_section(SectionId::Gallery) {
            Some(Gallery::mount(
                &scope,
                config.slides.clone(),
                scroll_lock.clone(),
                GalleryConfig {
                    autoplay_interval: config.timing.autoplay_interval(),
                    auto_play: true,
                },
            )?)
        } else {
            None
        };

        let toaster = Toaster::new();
        let popup = ContactPopup::mount(&scope, toaster.clone(), &config.timing);
        let mut navbar = Navbar::new(&config);
        navbar.on_scroll(viewport.scroll_y);

        log::info!(
            "mounted page '{}' with {} sections",
            config.name,
            config.sections.len()
        );
        Ok(Self {
            decorative: DecorativeLayer::new(viewport.height),
            config,
            scope,
            watcher,
            sections,
            anchors: SectionAnchors::new(),
            navbar,
            scroll_lock,
            gallery,
            popup,
            contact: ContactForm::new(FormVariant::Section),
            toaster,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_disposed()
    }

    /// Layout result for a section.
    pub fn layout(&mut self, id: SectionId, rect: Rect) {
        self.anchors.register(id, rect);
        if let Some(section) = self.sections.iter().find(|s| s.id == id) {
            section.region.set_bounds(rect);
        }
    }

    /// New scroll position or window size. While a lightbox holds the scroll
    /// lock the page keeps its offset but still takes the new size. Returns
    /// whether the scroll offset was applied.
    pub fn scroll(&mut self, viewport: Viewport) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if self.scroll_lock.is_locked() {
            log::trace!("scroll to {} ignored while locked", viewport.scroll_y);
            let held = self.watcher.viewport().map_or(0.0, |v| v.scroll_y);
            let resized = Viewport {
                scroll_y: held,
                ..viewport
            };
            if self.watcher.viewport() != Some(resized) {
                self.watcher.set_viewport(resized);
            }
            return false;
        }
        self.watcher.set_viewport(viewport);
        self.navbar.on_scroll(viewport.scroll_y);
        true
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.watcher.viewport()
    }

    /// Scrolls to a section through the navbar. Returns the new offset.
    pub fn navigate(&mut self, id: SectionId) -> Option<f32> {
        let target = self.navbar.navigate(id, &self.anchors)?;
        let viewport = self.viewport()?;
        self.scroll(Viewport {
            scroll_y: target,
            ..viewport
        })
        .then_some(target)
    }

    /// Pumps due timers and settles the carousel. Returns the number of
    /// timer callbacks that ran.
    pub fn tick(&self) -> usize {
        let fired = run_due_timers();
        if let Some(gallery) = &self.gallery {
            gallery.tick();
        }
        fired
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionMotion> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn sections(&self) -> &[SectionMotion] {
        &self.sections
    }

    pub fn anchors(&self) -> &SectionAnchors {
        &self.anchors
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn navbar_mut(&mut self) -> &mut Navbar {
        &mut self.navbar
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn popup(&self) -> &ContactPopup {
        &self.popup
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    pub fn set_contact_field(&mut self, field: Field, value: impl Into<String>) {
        self.contact.set(field, value);
    }

    pub fn submit_contact(&mut self) -> Option<ContactRequest> {
        self.contact.submit(&self.toaster)
    }

    pub fn decorative_frame(&self) -> DecorativeFrame {
        self.decorative.frame()
    }

    /// Tears down every timer, region and reveal the page owns.
    pub fn unmount(&self) {
        if self.is_mounted() {
            log::info!("unmounting page '{}'", self.config.name);
        }
        self.scope.dispose();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::{TestClock, pending_timers};

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport::new(scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn hero_reveals_without_scrolling() {
        let clock = TestClock::install();
        let page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        clock.advance(ms(800));
        let hero = page.section(SectionId::Home).unwrap();
        assert_eq!(hero.sample("heading"), Some(vec![MotionState::VISIBLE]));
        assert!(!page.section(SectionId::About).unwrap().is_settled());
    }

    #[test]
    fn amenity_cards_follow_config() {
        let _clock = TestClock::install();
        let page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        let cards = page.section(SectionId::Amenities).unwrap().part("cards").unwrap();
        assert_eq!(cards.children().len(), 12);
        assert_eq!(cards.children()[11].spec().animation.delay, ms(550));
    }

    #[test]
    fn page_without_gallery_section() {
        let _clock = TestClock::install();
        let mut config = SiteConfig::default();
        config.sections.retain(|s| s.id != SectionId::Gallery);
        let page = Page::mount(config, viewport(0.0)).unwrap();
        assert!(page.gallery().is_none());
        // Only the popup timer.
        assert_eq!(pending_timers(), 1);
    }

    #[test]
    fn unmount_clears_timers_and_regions() {
        let _clock = TestClock::install();
        let page = Page::mount(SiteConfig::default(), viewport(0.0)).unwrap();
        assert_eq!(pending_timers(), 2);
        page.unmount();
        assert_eq!(pending_timers(), 0);
        assert!(!page.section(SectionId::About).unwrap().region.is_observed());
    }
}
