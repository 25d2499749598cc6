//! # Viewport-driven motion
//!
//! The motion layer of a Vista page, built on `vista-core`:
//!
//! - [`viewport`]: `ViewportWatcher` reports when a section enters the
//!   (margin-adjusted) viewport, with a fire-once latch.
//! - [`reveal`]: `RevealAnimator` plays a one-shot reveal when its region
//!   triggers; `RevealGroup` staggers children.
//! - [`carousel`]: slide state machine, direction-aware transitions and a
//!   scoped autoplay timer.
//! - [`lightbox`]: modal overlay holding the background-scroll lock.
//! - [`decorative`]: deterministic ambient loops and parallax.
//! - [`gallery`]: carousel + lightbox mounted together in a scope.
//!
//! ```rust
//! use vista_core::*;
//! use vista_motion::*;
//!
//! let clock = TestClock::install();
//! let page = Scope::new();
//! let watcher = ViewportWatcher::new();
//!
//! let about = watcher.observe_in(&page, ObserveOptions::default());
//! about.set_bounds(Rect::new(0.0, 900.0, 1280.0, 500.0));
//! let heading = RevealAnimator::new(RevealSpec::fade_up());
//! heading.bind_in(&page, &about);
//!
//! watcher.set_viewport(Viewport::new(400.0, 1280.0, 800.0));
//! clock.advance(web_time::Duration::from_secs(1));
//! assert_eq!(heading.sample(), MotionState::VISIBLE);
//! ```

pub mod carousel;
pub mod decorative;
pub mod error;
pub mod gallery;
pub mod lightbox;
pub mod reveal;
pub mod viewport;


pub use carousel::{
    AUTOPLAY_INTERVAL, Autoplay, Carousel, CarouselPhase, CarouselState, Direction, Slide,
    SlideFrame, SlideLayer, SlideTransition,
};
pub use decorative::{DecorativeFrame, DecorativeLayer, LoopingMotion, Parallax};
pub use error::MotionError;
pub use gallery::{Gallery, GalleryConfig, GalleryInput, Key};
pub use lightbox::{
    DismissReason, LightboxController, LightboxMotion, LightboxState, ScrollLock, ScrollLockGuard,
};
pub use reveal::{RevealAnimator, RevealGroup, RevealSchedule, RevealSpec};
pub use viewport::{
    DEFAULT_ENTRY_MARGIN_PX, ObserveOptions, RegionId, RegionWatch, Viewport, ViewportWatcher,
    VisibilityState,
};
