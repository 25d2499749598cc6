//! # Viewport model
//!
//! A `ViewportWatcher` tracks the visible window of a scrolling page and a
//! set of watched regions laid out in document coordinates. Each region
//! owns a `Signal<VisibilityState>` that changes only when its visibility
//! does.
//!
//! - `Viewport`: scroll offset plus window size, fed by the host on every
//!   scroll or resize.
//! - `ObserveOptions`: entry margin and fire-once mode per region.
//! - `RegionWatch`: handle returned by `observe`; reports state and
//!   unobserves when disposed.
//!
//! A region counts as visible when it overlaps the viewport *after* the
//! viewport has been grown by `entry_margin_px` on every edge. The default
//! margin is `-100`, which shrinks the viewport so a section must be 100px
//! inside the window before it reveals.
//!
//! ```rust
//! use vista_core::Rect;
//! use vista_motion::viewport::*;
//!
//! let watcher = ViewportWatcher::new();
//! let about = watcher.observe(ObserveOptions::default());
//! about.set_bounds(Rect::new(0.0, 1000.0, 1280.0, 600.0));
//!
//! watcher.set_viewport(Viewport::new(0.0, 1280.0, 800.0));
//! assert!(!about.state().is_visible);
//!
//! watcher.set_viewport(Viewport::new(450.0, 1280.0, 800.0));
//! assert!(about.state().has_fired_once);
//! ```
//!
//! A region whose bounds are never set never becomes visible. That is a
//! valid resting state, not an error.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use vista_core::{Dispose, Rect, Scope, Signal, signal};

new_key_type! {
    pub struct RegionId;
}

/// Entry margin used by every page section.
pub const DEFAULT_ENTRY_MARGIN_PX: f32 = -100.0;

/// Visible window of the page, in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_y: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width.max(0.0), self.height.max(0.0))
    }

    /// The window a region has to overlap to count as visible.
    pub fn effective_rect(&self, entry_margin_px: f32) -> Rect {
        self.rect().outset(entry_margin_px)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserveOptions {
    pub entry_margin_px: f32,
    pub fire_once: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            entry_margin_px: DEFAULT_ENTRY_MARGIN_PX,
            fire_once: true,
        }
    }
}

impl ObserveOptions {
    pub fn margin(mut self, px: f32) -> Self {
        self.entry_margin_px = px;
        self
    }
    pub fn fire_once(mut self, once: bool) -> Self {
        self.fire_once = once;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub is_visible: bool,
    /// Latched on the first visible observation of a fire-once region.
    /// Never reset while the region is observed.
    pub has_fired_once: bool,
}

impl VisibilityState {
    fn observe(self, visible: bool, fire_once: bool) -> Self {
        Self {
            is_visible: visible,
            has_fired_once: self.has_fired_once || (fire_once && visible),
        }
    }
}

struct Region {
    bounds: Option<Rect>,
    options: ObserveOptions,
    state: Signal<VisibilityState>,
}

#[derive(Default)]
struct WatcherInner {
    viewport: Option<Viewport>,
    regions: SlotMap<RegionId, Region>,
}

impl WatcherInner {
    /// Computes new states for `ids` without touching any signal.
    fn recompute(
        &self,
        ids: impl Iterator<Item = RegionId>,
    ) -> Vec<(Signal<VisibilityState>, VisibilityState)> {
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        ids.filter_map(|id| {
            let region = self.regions.get(id)?;
            let bounds = region.bounds?;
            let window = viewport.effective_rect(region.options.entry_margin_px);
            let visible = bounds.intersects(&window);
            let next = region
                .state
                .get()
                .observe(visible, region.options.fire_once);
            Some((region.state.clone(), next))
        })
        .collect()
    }
}

/// Watches regions against the page viewport. Clones share the same set of
/// regions.
#[derive(Clone, Default)]
pub struct ViewportWatcher {
    inner: Rc<RefCell<WatcherInner>>,
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts watching a region. Its bounds are unknown until
    /// [`RegionWatch::set_bounds`] is called.
    pub fn observe(&self, options: ObserveOptions) -> RegionWatch {
        let state = signal(VisibilityState::default());
        let id = self.inner.borrow_mut().regions.insert(Region {
            bounds: None,
            options,
            state: state.clone(),
        });
        log::trace!("observing region {id:?} ({options:?})");
        RegionWatch {
            id,
            options,
            state,
            watcher: Rc::downgrade(&self.inner),
        }
    }

    /// Like [`observe`](Self::observe), unobserving when `scope` is disposed.
    pub fn observe_in(&self, scope: &Scope, options: ObserveOptions) -> RegionWatch {
        let watch = self.observe(options);
        scope.adopt(watch.dispose_handle());
        watch
    }

    /// Host scroll/resize. Re-evaluates every region.
    pub fn set_viewport(&self, viewport: Viewport) {
        let updates = {
            let mut inner = self.inner.borrow_mut();
            inner.viewport = Some(viewport);
            let ids: Vec<RegionId> = inner.regions.keys().collect();
            inner.recompute(ids.into_iter())
        };
        publish(updates);
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.inner.borrow().viewport
    }

    pub fn unobserve(&self, id: RegionId) {
        unobserve(&self.inner, id);
    }

    pub fn region_count(&self) -> usize {
        self.inner.borrow().regions.len()
    }
}

fn publish(updates: Vec<(Signal<VisibilityState>, VisibilityState)>) {
    for (sig, next) in updates {
        sig.set_if_changed(next);
    }
}

fn unobserve(inner: &RefCell<WatcherInner>, id: RegionId) {
    if inner.borrow_mut().regions.remove(id).is_some() {
        log::trace!("unobserved region {id:?}");
    }
}

/// Handle to one watched region.
#[derive(Clone)]
pub struct RegionWatch {
    id: RegionId,
    options: ObserveOptions,
    state: Signal<VisibilityState>,
    watcher: Weak<RefCell<WatcherInner>>,
}

impl std::fmt::Debug for RegionWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionWatch")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("state", &self.state.get())
            .finish()
    }
}

impl RegionWatch {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn options(&self) -> ObserveOptions {
        self.options
    }

    pub fn state(&self) -> VisibilityState {
        self.state.get()
    }

    pub fn signal(&self) -> Signal<VisibilityState> {
        self.state.clone()
    }

    /// Whether consumers should treat the region as shown: the latch for
    /// fire-once regions, raw visibility otherwise.
    pub fn is_triggered(&self) -> bool {
        let s = self.state();
        if self.options.fire_once {
            s.has_fired_once
        } else {
            s.is_visible
        }
    }

    /// Layout result for the region (mount or resize). Ignored once the
    /// region is unobserved.
    pub fn set_bounds(&self, bounds: Rect) {
        let Some(inner) = self.watcher.upgrade() else {
            return;
        };
        let updates = {
            let mut w = inner.borrow_mut();
            let Some(region) = w.regions.get_mut(self.id) else {
                return;
            };
            region.bounds = Some(bounds);
            w.recompute(std::iter::once(self.id))
        };
        publish(updates);
    }

    pub fn bounds(&self) -> Option<Rect> {
        let inner = self.watcher.upgrade()?;
        let w = inner.borrow();
        w.regions.get(self.id).and_then(|r| r.bounds)
    }

    pub fn is_observed(&self) -> bool {
        self.watcher
            .upgrade()
            .is_some_and(|inner| inner.borrow().regions.contains_key(self.id))
    }

    /// Cleanup that stops watching this region.
    pub fn dispose_handle(&self) -> Dispose {
        let watcher = self.watcher.clone();
        let id = self.id;
        Dispose::new(move || {
            if let Some(inner) = watcher.upgrade() {
                unobserve(&inner, id);
            }
        })
    }
}
