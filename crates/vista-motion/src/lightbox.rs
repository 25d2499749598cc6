//! Modal image overlay and the background-scroll lock it holds while open.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vista_core::{AnimationSpec, Easing, Interpolate, MotionState, Signal, now, signal};
use web_time::{Duration, Instant};

use crate::error::MotionError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        active_slide_ref: String,
    },
}

impl LightboxState {
    pub fn is_open(&self) -> bool {
        matches!(self, LightboxState::Open { .. })
    }

    pub fn active_slide_ref(&self) -> Option<&str> {
        match self {
            LightboxState::Open { active_slide_ref } => Some(active_slide_ref),
            LightboxState::Closed => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    Backdrop,
    CloseButton,
    Escape,
    /// The owning region went away.
    Unmount,
}

/// Page-wide background scroll lock. The host reads [`signal`](Self::signal)
/// to toggle `overflow: hidden` (or its equivalent).
#[derive(Clone, Debug)]
pub struct ScrollLock {
    locked: Signal<bool>,
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        Self {
            locked: signal(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.locked.clone()
    }

    /// Locks background scroll until the returned guard is dropped.
    pub fn try_acquire(&self) -> Result<ScrollLockGuard, MotionError> {
        if self.locked.get() {
            log::warn!("scroll lock already held");
            return Err(MotionError::ScrollLockHeld);
        }
        self.locked.set(true);
        log::debug!("background scroll locked");
        Ok(ScrollLockGuard {
            locked: self.locked.clone(),
        })
    }
}

/// Releases the scroll lock on drop.
#[derive(Debug)]
pub struct ScrollLockGuard {
    locked: Signal<bool>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.locked.set(false);
        log::debug!("background scroll restored");
    }
}

/// Overlay and image motion of the lightbox for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightboxMotion {
    pub overlay: MotionState,
    pub content: MotionState,
}

impl LightboxMotion {
    pub const HIDDEN: LightboxMotion = LightboxMotion {
        overlay: MotionState::HIDDEN,
        content: MotionState {
            opacity: 0.0,
            scale: 0.9,
            ..MotionState::VISIBLE
        },
    };

    pub const SHOWN: LightboxMotion = LightboxMotion {
        overlay: MotionState::VISIBLE,
        content: MotionState::VISIBLE,
    };
}

struct Inner {
    state: Signal<LightboxState>,
    lock: ScrollLock,
    guard: RefCell<Option<ScrollLockGuard>>,
    generation: Cell<u64>,
    loaded: Cell<bool>,
    toggled_at: Cell<Option<Instant>>,
    fade: AnimationSpec,
}

/// Lightbox state machine. Clones share one overlay; a page holds exactly
/// one controller over its `ScrollLock`.
#[derive(Clone)]
pub struct LightboxController {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for LightboxController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightboxController")
            .field("state", &self.state())
            .field("generation", &self.inner.generation.get())
            .finish()
    }
}

impl LightboxController {
    pub fn new(lock: ScrollLock) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: signal(LightboxState::Closed),
                lock,
                guard: RefCell::new(None),
                generation: Cell::new(0),
                loaded: Cell::new(false),
                toggled_at: Cell::new(None),
                fade: AnimationSpec::tween(Duration::from_millis(300), Easing::EaseOut),
            }),
        }
    }

    pub fn state(&self) -> LightboxState {
        self.inner.state.get()
    }

    pub fn signal(&self) -> Signal<LightboxState> {
        self.inner.state.clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.with(LightboxState::is_open)
    }

    pub fn active_slide_ref(&self) -> Option<String> {
        self.inner
            .state
            .with(|s| s.active_slide_ref().map(str::to_owned))
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.inner.lock
    }

    /// Shows `slide_ref`. Opening while open swaps the image and keeps the
    /// lock. Returns the load generation of the new image.
    pub fn open(&self, slide_ref: impl Into<String>) -> Result<u64, MotionError> {
        let slide_ref = slide_ref.into();
        let was_open = self.is_open();
        if !was_open {
            let guard = self.inner.lock.try_acquire()?;
            *self.inner.guard.borrow_mut() = Some(guard);
            self.inner.toggled_at.set(Some(now()));
        }
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        self.inner.loaded.set(false);
        log::debug!("lightbox open: {slide_ref} (generation {generation})");
        self.inner.state.set(LightboxState::Open {
            active_slide_ref: slide_ref,
        });
        Ok(generation)
    }

    /// Closes and releases the scroll lock. A no-op when already closed.
    pub fn close(&self, reason: DismissReason) -> bool {
        if !self.is_open() {
            return false;
        }
        // Invalidate any load still in flight.
        self.inner.generation.set(self.inner.generation.get() + 1);
        self.inner.loaded.set(false);
        self.inner.toggled_at.set(Some(now()));
        drop(self.inner.guard.borrow_mut().take());
        log::debug!("lightbox closed ({reason:?})");
        self.inner.state.set(LightboxState::Closed);
        true
    }

    /// Clicks on the enlarged image stay inside the content and never reach
    /// the backdrop.
    pub fn on_content_click(&self) {}

    pub fn load_generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// Reports a finished image load. Loads for a closed or replaced image
    /// are ignored; returns whether this one was accepted.
    pub fn image_loaded(&self, generation: u64) -> bool {
        if !self.is_open() || generation != self.inner.generation.get() {
            log::trace!("lightbox: stale image load {generation} ignored");
            return false;
        }
        self.inner.loaded.set(true);
        true
    }

    pub fn is_image_loaded(&self) -> bool {
        self.inner.loaded.get()
    }

    pub fn motion(&self) -> LightboxMotion {
        let (from, to) = if self.is_open() {
            (LightboxMotion::HIDDEN, LightboxMotion::SHOWN)
        } else {
            (LightboxMotion::SHOWN, LightboxMotion::HIDDEN)
        };
        let Some(at) = self.inner.toggled_at.get() else {
            return to;
        };
        let elapsed = now().saturating_duration_since(at);
        if self.inner.fade.is_finished(elapsed) {
            return to;
        }
        let t = self.inner.fade.progress(elapsed);
        LightboxMotion {
            overlay: from.overlay.interpolate(&to.overlay, t),
            content: from.content.interpolate(&to.content, t),
        }
    }
}
