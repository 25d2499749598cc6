//! # Carousel
//!
//! `Carousel` owns an ordered slide list and a two-state machine:
//!
//! - `Idle { index }`: a slide at rest.
//! - `Transitioning { from, to, direction, started_at }`: a slide entering
//!   while the previous one leaves.
//!
//! Navigation always wraps. A request that arrives mid-transition supersedes
//! it: the new transition starts from the in-flight target, so the index at
//! rest is always the target of the most recent transition.
//!
//! Autoplay lives in [`Autoplay`], a timer handle that advances the carousel
//! on a fixed schedule and is cancelled when the handle is dropped or
//! disposed. Manual navigation does not move that schedule.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vista_core::{AnimationSpec, Dispose, Easing, Interpolate, MotionState, now, set_interval};
use web_time::{Duration, Instant};

use crate::error::MotionError;

/// Autoplay period of the gallery.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slide {
    pub source_ref: String,
    pub alt_text: String,
    pub caption: String,
}

impl Slide {
    pub fn new(
        source_ref: impl Into<String>,
        alt_text: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            source_ref: source_ref.into(),
            alt_text: alt_text.into(),
            caption: caption.into(),
        }
    }
}

/// Sign of the last index change. `Forward` slides arrive from the right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::None => 0,
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Direction of a jump: forward iff the target index is numerically
    /// greater, regardless of wraparound distance.
    pub fn toward(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselPhase {
    Idle {
        index: usize,
    },
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
        started_at: Instant,
    },
}

/// Snapshot of the observable carousel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub direction: Direction,
    pub is_auto_playing: bool,
}

/// Enter/exit vectors and timing of a slide change.
///
/// The horizontal offset follows a spring; opacity and scale use a short
/// tween, so a slide is fully faded in well before it stops moving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideTransition {
    pub position: AnimationSpec,
    pub fade: AnimationSpec,
    pub rest_scale: f32,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self {
            position: AnimationSpec::spring_phys(30.0, 300.0, Duration::from_millis(500)),
            fade: AnimationSpec::tween(Duration::from_millis(200), Easing::EaseInOut),
            rest_scale: 0.95,
        }
    }
}

impl SlideTransition {
    /// Where the incoming slide starts.
    pub fn enter(&self, direction: Direction) -> MotionState {
        MotionState::HIDDEN
            .with_x_percent(100.0 * f32::from(direction.sign()))
            .with_scale(self.rest_scale)
    }

    pub fn center(&self) -> MotionState {
        MotionState::VISIBLE
    }

    /// Where the outgoing slide ends: the side opposite to `enter`.
    pub fn exit(&self, direction: Direction) -> MotionState {
        MotionState::HIDDEN
            .with_x_percent(-100.0 * f32::from(direction.sign()))
            .with_scale(self.rest_scale)
    }

    pub fn duration(&self) -> Duration {
        self.position.total().max(self.fade.total())
    }

    fn blend(&self, from: MotionState, to: MotionState, elapsed: Duration) -> MotionState {
        let moved = from.interpolate(&to, self.position.progress(elapsed));
        let faded = from.interpolate(&to, self.fade.progress(elapsed));
        MotionState {
            x_percent: moved.x_percent,
            opacity: faded.opacity,
            scale: faded.scale,
            ..to
        }
    }

    pub fn incoming(&self, direction: Direction, elapsed: Duration) -> MotionState {
        if elapsed >= self.duration() {
            return self.center();
        }
        self.blend(self.enter(direction), self.center(), elapsed)
    }

    pub fn outgoing(&self, direction: Direction, elapsed: Duration) -> MotionState {
        if elapsed >= self.duration() {
            return self.exit(direction);
        }
        self.blend(self.center(), self.exit(direction), elapsed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideLayer {
    pub index: usize,
    pub motion: MotionState,
}

/// What to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideFrame {
    pub incoming: SlideLayer,
    pub outgoing: Option<SlideLayer>,
}

pub struct Carousel {
    slides: Vec<Slide>,
    phase: CarouselPhase,
    direction: Direction,
    auto_playing: bool,
    transition: SlideTransition,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.slides.len())
            .field("phase", &self.phase)
            .field("direction", &self.direction)
            .field("auto_playing", &self.auto_playing)
            .finish()
    }
}

impl Carousel {
    pub fn new(slides: Vec<Slide>) -> Result<Self, MotionError> {
        if slides.is_empty() {
            return Err(MotionError::EmptyCarousel);
        }
        Ok(Self {
            slides,
            phase: CarouselPhase::Idle { index: 0 },
            direction: Direction::None,
            auto_playing: true,
            transition: SlideTransition::default(),
        })
    }

    pub fn with_transition(mut self, transition: SlideTransition) -> Self {
        self.transition = transition;
        self
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the slide at rest, or the target of the running transition.
    pub fn current_index(&self) -> usize {
        match self.phase {
            CarouselPhase::Idle { index } => index,
            CarouselPhase::Transitioning { to, .. } => to,
        }
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current_index()]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn transition(&self) -> &SlideTransition {
        &self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, CarouselPhase::Transitioning { .. })
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_playing
    }

    pub fn set_auto_playing(&mut self, on: bool) {
        self.auto_playing = on;
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current_index(),
            direction: self.direction,
            is_auto_playing: self.auto_playing,
        }
    }

    /// Next slide, wrapping. No-op on a single-slide carousel.
    pub fn advance(&mut self) -> bool {
        if self.slides.len() < 2 {
            return false;
        }
        let to = (self.current_index() + 1) % self.slides.len();
        self.begin(to, Direction::Forward);
        true
    }

    /// Previous slide, wrapping. No-op on a single-slide carousel.
    pub fn retreat(&mut self) -> bool {
        if self.slides.len() < 2 {
            return false;
        }
        let n = self.slides.len();
        let to = (self.current_index() + n - 1) % n;
        self.begin(to, Direction::Backward);
        true
    }

    /// Jumps straight to `target`. Jumping to the current slide does nothing.
    pub fn jump_to(&mut self, target: usize) -> Result<bool, MotionError> {
        if target >= self.slides.len() {
            log::warn!(
                "carousel: jump to {target} rejected ({} slides)",
                self.slides.len()
            );
            return Err(MotionError::SlideOutOfRange {
                index: target,
                len: self.slides.len(),
            });
        }
        let current = self.current_index();
        if target == current {
            // Not numerically greater, so recorded as backward. Nothing moves.
            self.direction = Direction::Backward;
            return Ok(false);
        }
        self.begin(target, Direction::toward(current, target));
        Ok(true)
    }

    fn begin(&mut self, to: usize, direction: Direction) {
        let from = self.current_index();
        if self.is_transitioning() {
            log::debug!("carousel: superseding transition toward {from} with {to}");
        }
        log::debug!("carousel: {from} -> {to} ({direction:?})");
        self.direction = direction;
        self.phase = CarouselPhase::Transitioning {
            from,
            to,
            direction,
            started_at: now(),
        };
    }

    /// Completes the running transition once its duration has elapsed.
    /// Returns whether a transition is still running.
    pub fn tick(&mut self) -> bool {
        if let CarouselPhase::Transitioning { started_at, .. } = self.phase {
            if now().saturating_duration_since(started_at) >= self.transition.duration() {
                self.finish_transition();
                return false;
            }
            return true;
        }
        false
    }

    pub fn finish_transition(&mut self) {
        if let CarouselPhase::Transitioning { to, .. } = self.phase {
            self.phase = CarouselPhase::Idle { index: to };
        }
    }

    pub fn frame(&self) -> SlideFrame {
        match self.phase {
            CarouselPhase::Idle { index } => SlideFrame {
                incoming: SlideLayer {
                    index,
                    motion: self.transition.center(),
                },
                outgoing: None,
            },
            CarouselPhase::Transitioning {
                from,
                to,
                direction,
                started_at,
            } => {
                let elapsed = now().saturating_duration_since(started_at);
                SlideFrame {
                    incoming: SlideLayer {
                        index: to,
                        motion: self.transition.incoming(direction, elapsed),
                    },
                    outgoing: Some(SlideLayer {
                        index: from,
                        motion: self.transition.outgoing(direction, elapsed),
                    }),
                }
            }
        }
    }
}

/// Scoped autoplay timer for a shared carousel.
///
/// Each tick advances the carousel when it is auto-playing and `gate`
/// allows it (the gallery closes the gate while the lightbox is open).
/// Skipped ticks keep the schedule. Dropping the handle cancels the timer.
pub struct Autoplay {
    timer: Dispose,
}

impl Autoplay {
    pub fn start(
        carousel: &Rc<RefCell<Carousel>>,
        interval: Duration,
        gate: impl Fn() -> bool + 'static,
    ) -> Self {
        let target: Weak<RefCell<Carousel>> = Rc::downgrade(carousel);
        let timer = set_interval(interval, move || {
            let Some(carousel) = target.upgrade() else {
                return;
            };
            let mut c = carousel.borrow_mut();
            if !c.is_auto_playing() || !gate() {
                log::trace!("autoplay: tick skipped");
                return;
            }
            c.advance();
        });
        Self { timer }
    }

    pub fn is_running(&self) -> bool {
        !self.timer.is_disposed()
    }

    /// Cancels the timer now.
    pub fn stop(&self) {
        self.timer.run();
    }

    /// Cleanup handle for tying the timer to a scope.
    pub fn handle(&self) -> Dispose {
        self.timer.clone()
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.timer.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::{TestClock, pending_timers, run_due_timers};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| {
                Slide::new(
                    format!("/img/{i}.webp"),
                    format!("alt {i}"),
                    format!("caption {i}"),
                )
            })
            .collect()
    }

    #[test]
    fn empty_carousel_rejected() {
        assert_eq!(
            Carousel::new(Vec::new()).unwrap_err(),
            MotionError::EmptyCarousel
        );
    }

    #[test]
    fn advance_cycles_back_to_start() {
        let _clock = TestClock::install();
        for n in 1..=6 {
            let mut c = Carousel::new(slides(n)).unwrap();
            c.jump_to(n / 2).unwrap();
            let start = c.current_index();
            for _ in 0..n {
                c.advance();
            }
            assert_eq!(c.current_index(), start, "n = {n}");
        }
    }

    #[test]
    fn retreat_inverts_advance() {
        let _clock = TestClock::install();
        for n in 1..=5 {
            for i in 0..n {
                let mut c = Carousel::new(slides(n)).unwrap();
                c.jump_to(i).unwrap();
                c.advance();
                c.retreat();
                assert_eq!(c.current_index(), i);
            }
        }
    }

    #[test]
    fn single_slide_navigation_is_noop() {
        let _clock = TestClock::install();
        let mut c = Carousel::new(slides(1)).unwrap();
        assert!(!c.advance());
        assert!(!c.retreat());
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.direction(), Direction::None);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn jump_direction_ignores_wraparound() {
        let _clock = TestClock::install();
        let mut c = Carousel::new(slides(8)).unwrap();
        c.jump_to(7).unwrap();
        assert_eq!(c.direction(), Direction::Forward);
        c.jump_to(0).unwrap();
        assert_eq!(c.direction(), Direction::Backward);
        assert_eq!(c.jump_to(0), Ok(false));
        assert_eq!(
            c.jump_to(8),
            Err(MotionError::SlideOutOfRange { index: 8, len: 8 })
        );
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn jump_to_current_slide_records_backward() {
        let _clock = TestClock::install();
        let mut c = Carousel::new(slides(4)).unwrap();
        assert_eq!(c.jump_to(0), Ok(false));
        assert_eq!(c.direction(), Direction::Backward);
        assert!(!c.is_transitioning());
        assert_eq!(c.current_index(), 0);
        assert!(c.frame().outgoing.is_none());
    }

    #[test]
    fn supersede_starts_from_in_flight_target() {
        let clock = TestClock::install();
        let mut c = Carousel::new(slides(4)).unwrap();
        c.advance();
        clock.advance(Duration::from_millis(50));
        c.advance();
        match c.phase() {
            CarouselPhase::Transitioning { from, to, .. } => {
                assert_eq!((from, to), (1, 2));
            }
            other => panic!("unexpected phase {other:?}"),
        }

        clock.advance(c.transition().duration());
        assert!(!c.tick());
        assert_eq!(c.phase(), CarouselPhase::Idle { index: 2 });
    }

    #[test]
    fn frame_vectors_follow_direction() {
        let clock = TestClock::install();
        let mut c = Carousel::new(slides(3)).unwrap();

        let rest = c.frame();
        assert_eq!(rest.incoming.motion, MotionState::VISIBLE);
        assert!(rest.outgoing.is_none());

        c.advance();
        let f = c.frame();
        assert_eq!(f.incoming.index, 1);
        assert_eq!(f.incoming.motion.x_percent, 100.0);
        assert_eq!(f.incoming.motion.scale, 0.95);
        assert_eq!(f.outgoing.map(|o| o.motion.x_percent), Some(0.0));

        clock.advance(Duration::from_millis(100));
        let mid = c.frame();
        assert!(mid.incoming.motion.x_percent < 100.0);
        assert!(mid.outgoing.unwrap().motion.x_percent < 0.0);

        c.finish_transition();
        c.retreat();
        let back = c.frame();
        assert_eq!(back.incoming.motion.x_percent, -100.0);
        let t = c.transition();
        assert_eq!(t.exit(Direction::Backward).x_percent, 100.0);
    }

    #[test]
    fn autoplay_advances_and_stops_on_drop() {
        let clock = TestClock::install();
        let carousel = Rc::new(RefCell::new(Carousel::new(slides(3)).unwrap()));
        let autoplay = Autoplay::start(&carousel, AUTOPLAY_INTERVAL, || true);

        clock.advance(AUTOPLAY_INTERVAL);
        run_due_timers();
        assert_eq!(carousel.borrow().current_index(), 1);

        drop(autoplay);
        assert_eq!(pending_timers(), 0);
        clock.advance(AUTOPLAY_INTERVAL * 3);
        run_due_timers();
        assert_eq!(carousel.borrow().current_index(), 1);
    }

    #[test]
    fn paused_autoplay_skips_ticks() {
        let clock = TestClock::install();
        let carousel = Rc::new(RefCell::new(Carousel::new(slides(3)).unwrap()));
        let _autoplay = Autoplay::start(&carousel, AUTOPLAY_INTERVAL, || true);

        carousel.borrow_mut().set_auto_playing(false);
        clock.advance(AUTOPLAY_INTERVAL);
        run_due_timers();
        assert_eq!(carousel.borrow().current_index(), 0);

        carousel.borrow_mut().set_auto_playing(true);
        clock.advance(AUTOPLAY_INTERVAL);
        run_due_timers();
        assert_eq!(carousel.borrow().current_index(), 1);
    }
}
