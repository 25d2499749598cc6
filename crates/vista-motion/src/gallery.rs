//! The gallery section: a carousel with autoplay and a lightbox, mounted in
//! a scope.
//!
//! Mounting registers the autoplay timer with the gallery's scope; unmounting
//! (disposing the scope or dropping the `Gallery`) cancels the timer and
//! closes the lightbox, which releases the scroll lock. Input that arrives
//! after unmount is ignored.

use std::cell::RefCell;
use std::rc::Rc;

use vista_core::Scope;
use web_time::Duration;

use crate::carousel::{AUTOPLAY_INTERVAL, Autoplay, Carousel, CarouselState, Slide, SlideFrame};
use crate::error::MotionError;
use crate::lightbox::{DismissReason, LightboxController, LightboxMotion, ScrollLock};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryConfig {
    pub autoplay_interval: Duration,
    pub auto_play: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: AUTOPLAY_INTERVAL,
            auto_play: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Pointer and keyboard input routed to the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryInput {
    Next,
    Previous,
    /// Dot indicator under the carousel.
    Indicator(usize),
    /// Click on the slide currently shown.
    SlideClicked,
    LightboxBackdrop,
    LightboxContent,
    LightboxClose,
    Key(Key),
    /// The lightbox image of the given load generation finished loading.
    ImageLoaded(u64),
}

pub struct Gallery {
    scope: Scope,
    carousel: Rc<RefCell<Carousel>>,
    lightbox: LightboxController,
    autoplay: Autoplay,
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("carousel", &self.carousel.borrow())
            .field("lightbox", &self.lightbox)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl Gallery {
    /// Mounts a gallery in a child of `parent`.
    pub fn mount(
        parent: &Scope,
        slides: Vec<Slide>,
        lock: ScrollLock,
        config: GalleryConfig,
    ) -> Result<Self, MotionError> {
        let mut carousel = Carousel::new(slides)?;
        carousel.set_auto_playing(config.auto_play);
        let carousel = Rc::new(RefCell::new(carousel));
        let lightbox = LightboxController::new(lock);
        let scope = parent.child();

        let autoplay = Autoplay::start(&carousel, config.autoplay_interval, {
            let lightbox = lightbox.clone();
            move || !lightbox.is_open()
        });
        scope.adopt(autoplay.handle());
        scope.add_disposer({
            let lightbox = lightbox.clone();
            move || {
                lightbox.close(DismissReason::Unmount);
            }
        });
        log::debug!(
            "gallery mounted ({} slides, autoplay every {:?})",
            carousel.borrow().len(),
            config.autoplay_interval
        );

        Ok(Self {
            scope,
            carousel,
            lightbox,
            autoplay,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_disposed()
    }

    pub fn unmount(&self) {
        self.scope.dispose();
    }

    pub fn handle(&self, input: GalleryInput) -> Result<(), MotionError> {
        if !self.is_mounted() {
            log::trace!("gallery: {input:?} after unmount ignored");
            return Ok(());
        }
        match input {
            GalleryInput::Next => {
                self.carousel.borrow_mut().advance();
            }
            GalleryInput::Previous => {
                self.carousel.borrow_mut().retreat();
            }
            GalleryInput::Indicator(index) => {
                self.carousel.borrow_mut().jump_to(index)?;
            }
            GalleryInput::SlideClicked => {
                let source = self.carousel.borrow().current_slide().source_ref.clone();
                self.lightbox.open(source)?;
            }
            GalleryInput::LightboxBackdrop => {
                self.lightbox.close(DismissReason::Backdrop);
            }
            GalleryInput::LightboxContent => self.lightbox.on_content_click(),
            GalleryInput::LightboxClose => {
                self.lightbox.close(DismissReason::CloseButton);
            }
            GalleryInput::Key(Key::Escape) => {
                self.lightbox.close(DismissReason::Escape);
            }
            // Arrow keys drive the carousel only while it is not covered.
            GalleryInput::Key(Key::ArrowLeft) if !self.lightbox.is_open() => {
                self.carousel.borrow_mut().retreat();
            }
            GalleryInput::Key(Key::ArrowRight) if !self.lightbox.is_open() => {
                self.carousel.borrow_mut().advance();
            }
            GalleryInput::Key(_) => {}
            GalleryInput::ImageLoaded(generation) => {
                self.lightbox.image_loaded(generation);
            }
        }
        Ok(())
    }

    /// Opens the lightbox on an image outside the carousel.
    pub fn open_image(&self, source_ref: impl Into<String>) -> Result<u64, MotionError> {
        self.lightbox.open(source_ref)
    }

    /// Completes a finished slide transition. Call once per frame.
    pub fn tick(&self) -> bool {
        self.is_mounted() && self.carousel.borrow_mut().tick()
    }

    pub fn frame(&self) -> SlideFrame {
        self.carousel.borrow().frame()
    }

    pub fn lightbox_motion(&self) -> LightboxMotion {
        self.lightbox.motion()
    }

    pub fn state(&self) -> CarouselState {
        self.carousel.borrow().state()
    }

    pub fn current_slide(&self) -> Slide {
        self.carousel.borrow().current_slide().clone()
    }

    pub fn set_auto_playing(&self, on: bool) {
        self.carousel.borrow_mut().set_auto_playing(on);
    }

    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}
