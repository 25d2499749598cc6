//! One-shot reveal animations.
//!
//! A `RevealAnimator` renders its rest state until the region it watches is
//! triggered, then interpolates to the visible state and holds it for the
//! rest of its life. Leaving the viewport never plays it backwards.

use std::cell::RefCell;
use std::rc::Rc;

use vista_core::{AnimationSpec, Dispose, Easing, MotionState, Scope, Tween, now};
use web_time::{Duration, Instant};

use crate::viewport::{RegionWatch, VisibilityState};

/// Rest state, visible state and timing of a reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealSpec {
    pub from: MotionState,
    pub to: MotionState,
    pub animation: AnimationSpec,
}

impl RevealSpec {
    pub fn new(from: MotionState, to: MotionState, animation: AnimationSpec) -> Self {
        Self {
            from,
            to,
            animation,
        }
    }

    /// Section headings: rise 30px while fading in.
    pub fn fade_up() -> Self {
        Self::new(
            MotionState::HIDDEN.with_offset(0.0, 30.0),
            MotionState::VISIBLE,
            AnimationSpec::tween(Duration::from_millis(600), Easing::EaseOut),
        )
    }

    pub fn fade_in() -> Self {
        Self::new(
            MotionState::HIDDEN,
            MotionState::VISIBLE,
            AnimationSpec::tween(Duration::from_millis(600), Easing::EaseOut),
        )
    }

    pub fn slide_from_left() -> Self {
        Self::new(
            MotionState::HIDDEN.with_offset(-50.0, 0.0),
            MotionState::VISIBLE,
            AnimationSpec::tween(Duration::from_millis(800), Easing::EaseOut),
        )
    }

    pub fn slide_from_right() -> Self {
        Self::new(
            MotionState::HIDDEN.with_offset(50.0, 0.0),
            MotionState::VISIBLE,
            AnimationSpec::tween(Duration::from_millis(800), Easing::EaseOut),
        )
    }

    /// Cards in a grid.
    pub fn scale_in() -> Self {
        Self::new(
            MotionState::HIDDEN.with_scale(0.9),
            MotionState::VISIBLE,
            AnimationSpec::tween(Duration::from_millis(500), Easing::EaseOut),
        )
    }

    /// Same timing, different rest state.
    pub fn with_from(mut self, from: MotionState) -> Self {
        self.from = from;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.animation.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.animation.delay = delay;
        self
    }

    pub fn tween(&self) -> Tween<MotionState> {
        Tween::new(self.from, self.to, self.animation)
    }
}

struct RevealInner {
    spec: RevealSpec,
    triggered_at: Option<Instant>,
}

impl RevealInner {
    fn sample(&self, at: Instant) -> MotionState {
        match self.triggered_at {
            Some(start) => self.spec.tween().sample(at.saturating_duration_since(start)),
            None => self.spec.from,
        }
    }
}

/// One-shot animator for a single element. Clones share state.
#[derive(Clone)]
pub struct RevealAnimator {
    inner: Rc<RefCell<RevealInner>>,
}

impl std::fmt::Debug for RevealAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("RevealAnimator")
            .field("spec", &inner.spec)
            .field("triggered_at", &inner.triggered_at)
            .finish()
    }
}

impl RevealAnimator {
    pub fn new(spec: RevealSpec) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RevealInner {
                spec,
                triggered_at: None,
            })),
        }
    }

    pub fn spec(&self) -> RevealSpec {
        self.inner.borrow().spec
    }

    /// Feeds a visibility observation and returns the state to render now.
    /// The first observation that is visible (or already latched) starts the
    /// reveal; nothing afterwards stops it.
    pub fn apply(&self, visibility: &VisibilityState) -> MotionState {
        if visibility.has_fired_once || visibility.is_visible {
            self.trigger();
        }
        self.sample()
    }

    /// Starts the reveal at the current clock time. Later calls are no-ops.
    pub fn trigger(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.triggered_at.is_none() {
            inner.triggered_at = Some(now());
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.borrow().triggered_at.is_some()
    }

    /// True once the element holds its visible state for good.
    pub fn is_settled(&self) -> bool {
        let inner = self.inner.borrow();
        inner
            .triggered_at
            .is_some_and(|t| inner.spec.animation.is_finished(now().saturating_duration_since(t)))
    }

    pub fn sample(&self) -> MotionState {
        self.inner.borrow().sample(now())
    }

    /// Drops any in-flight progress. Used on unmount; never errors.
    pub fn cancel(&self) {
        self.inner.borrow_mut().triggered_at = None;
    }

    /// Triggers from a watched region: immediately if it already fired,
    /// otherwise on the change that makes it visible. The returned handle
    /// unsubscribes and discards in-flight state.
    pub fn bind(&self, watch: &RegionWatch) -> Dispose {
        let sig = watch.signal();
        if watch.is_triggered() {
            self.trigger();
        }
        let fire_once = watch.options().fire_once;
        let sub = sig.subscribe({
            let me = self.clone();
            move |s| {
                let hit = if fire_once { s.has_fired_once } else { s.is_visible };
                if hit {
                    me.trigger();
                }
            }
        });
        let me = self.clone();
        Dispose::new(move || {
            sig.unsubscribe(sub);
            me.cancel();
        })
    }

    pub fn bind_in(&self, scope: &Scope, watch: &RegionWatch) {
        scope.adopt(self.bind(watch));
    }
}

/// Per-child start delays of a stagger group: `index * interval`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealSchedule {
    delays: Vec<Duration>,
}

impl RevealSchedule {
    pub fn new(count: usize, stagger_interval: Duration) -> Self {
        let delays = (0..count)
            .map(|i| stagger_interval.saturating_mul(i as u32))
            .collect();
        Self { delays }
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

/// Children revealed together, each offset by the stagger interval so they
/// appear in visual order.
#[derive(Clone, Debug)]
pub struct RevealGroup {
    schedule: RevealSchedule,
    children: Vec<RevealAnimator>,
}

impl RevealGroup {
    pub fn new(spec: RevealSpec, count: usize, stagger_interval: Duration) -> Self {
        let schedule = RevealSchedule::new(count, stagger_interval);
        let children = schedule
            .delays()
            .iter()
            .map(|extra| RevealAnimator::new(spec.with_delay(spec.animation.delay + *extra)))
            .collect();
        Self { schedule, children }
    }

    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    pub fn children(&self) -> &[RevealAnimator] {
        &self.children
    }

    pub fn trigger(&self) {
        for child in &self.children {
            child.trigger();
        }
    }

    pub fn apply(&self, visibility: &VisibilityState) -> Vec<MotionState> {
        self.children.iter().map(|c| c.apply(visibility)).collect()
    }

    pub fn sample(&self) -> Vec<MotionState> {
        self.children.iter().map(RevealAnimator::sample).collect()
    }

    pub fn is_settled(&self) -> bool {
        self.children.iter().all(RevealAnimator::is_settled)
    }

    pub fn bind_in(&self, scope: &Scope, watch: &RegionWatch) {
        for child in &self.children {
            child.bind_in(scope, watch);
        }
    }
}
