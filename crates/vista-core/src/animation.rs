use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;
use web_time::{Duration, Instant};

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

/// Current time according to the installed clock (system time if none).
pub fn now() -> Instant {
    CLOCK
        .with(|c| c.borrow().as_ref().map(|c| c.now()))
        .unwrap_or_else(Instant::now)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Unit-mass spring, evaluated against real elapsed seconds.
    Spring { damping: f32, stiffness: f32 },
}

impl Easing {
    /// Maps normalized time `t` in `[0, 1]` onto eased progress.
    ///
    /// Springs have no normalized form; they fall back to ease-out here and are
    /// resolved against elapsed time by [`AnimationSpec::progress`].
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring { .. } => t * (2.0 - t),
        }
    }
}

/// Displacement of a unit-mass spring released from 0 toward 1 at rest.
fn spring_position(damping: f32, stiffness: f32, secs: f32) -> f32 {
    let omega0 = stiffness.max(f32::EPSILON).sqrt();
    let zeta = damping / (2.0 * omega0);

    if zeta < 1.0 {
        // Underdamped
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * secs).exp();
        1.0 - envelope
            * ((omega_d * secs).cos() + (zeta * omega0 / omega_d) * (omega_d * secs).sin())
    } else if (zeta - 1.0).abs() < 1e-4 {
        1.0 - (-omega0 * secs).exp() * (1.0 + omega0 * secs)
    } else {
        // Overdamped
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        1.0 - (r2 * (r1 * secs).exp() - r1 * (r2 * secs).exp()) / (r2 - r1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }
    pub fn spring() -> Self {
        Self::spring_phys(30.0, 300.0, Duration::from_millis(500))
    }
    pub fn spring_phys(damping: f32, stiffness: f32, duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::Spring { damping, stiffness },
            delay: Duration::ZERO,
        }
    }
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Eased progress `elapsed` after the animation was started. Zero while
    /// the delay is pending, exactly one once `delay + duration` has passed.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(t) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if t >= self.duration || self.duration.is_zero() {
            return 1.0;
        }
        match self.easing {
            Easing::Spring { damping, stiffness } => {
                spring_position(damping, stiffness, t.as_secs_f32())
            }
            easing => easing.interpolate(t.as_secs_f32() / self.duration.as_secs_f32()),
        }
    }

    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for crate::Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        let lerp =
            |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
        crate::Color(
            lerp(self.0, other.0),
            lerp(self.1, other.1),
            lerp(self.2, other.2),
            lerp(self.3, other.3),
        )
    }
}

impl Interpolate for crate::Vec2 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        crate::Vec2 {
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
        }
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

/// Install the animation clock for this thread. Without one, `now()` reads
/// the system clock; tests install a [`TestClock`].
pub fn set_clock(clock: impl Clock) {
    CLOCK.with(|c| *c.borrow_mut() = Some(Rc::new(clock)));
}

/// A test clock you can drive deterministically. Clones share the same time.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl TestClock {
    pub fn new(t: Instant) -> Self {
        Self {
            t: Rc::new(Cell::new(t)),
        }
    }

    /// Creates a clock frozen at the current instant and installs it.
    pub fn install() -> Self {
        let clock = Self::new(Instant::now());
        set_clock(clock.clone());
        clock
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }

    pub fn set(&self, t: Instant) {
        self.t.set(t);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Two declared states and the spec that moves between them. Pure data: the
/// same tween sampled at the same elapsed time always yields the same value.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T: Interpolate + Clone> {
    pub from: T,
    pub to: T,
    pub spec: AnimationSpec,
}

impl<T: Interpolate + Clone> Tween<T> {
    pub fn new(from: T, to: T, spec: AnimationSpec) -> Self {
        Self { from, to, spec }
    }

    pub fn sample(&self, elapsed: Duration) -> T {
        if self.spec.is_finished(elapsed) {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, self.spec.progress(elapsed))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.spec.is_finished(elapsed)
    }
}

/// A keyframe track: values at normalized times, eased per segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes<T: Interpolate + Clone> {
    values: SmallVec<[T; 5]>,
    times: SmallVec<[f32; 5]>,
    easing: Easing,
}

impl<T: Interpolate + Clone> Keyframes<T> {
    /// Evenly spaced keyframes.
    pub fn new(values: impl IntoIterator<Item = T>, easing: Easing) -> Self {
        let values: SmallVec<[T; 5]> = values.into_iter().collect();
        let last = values.len().saturating_sub(1).max(1) as f32;
        let times = (0..values.len()).map(|i| i as f32 / last).collect();
        Self {
            values,
            times,
            easing,
        }
    }

    /// Keyframes at explicit normalized times. Lengths must match; extra
    /// entries on either side are ignored.
    pub fn with_times(
        values: impl IntoIterator<Item = T>,
        times: impl IntoIterator<Item = f32>,
        easing: Easing,
    ) -> Self {
        let mut values: SmallVec<[T; 5]> = values.into_iter().collect();
        let mut times: SmallVec<[f32; 5]> = times.into_iter().collect();
        let n = values.len().min(times.len());
        values.truncate(n);
        times.truncate(n);
        Self {
            values,
            times,
            easing,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    /// Value at normalized progress `p` in `[0, 1]`.
    pub fn sample(&self, p: f32) -> Option<T> {
        let first = self.values.first()?;
        let p = p.clamp(0.0, 1.0);
        if self.values.len() == 1 || p <= self.times[0] {
            return Some(first.clone());
        }
        for i in 1..self.values.len() {
            let (t0, t1) = (self.times[i - 1], self.times[i]);
            if p <= t1 {
                let span = (t1 - t0).max(f32::EPSILON);
                let local = self.easing.interpolate((p - t0) / span);
                return Some(self.values[i - 1].interpolate(&self.values[i], local));
            }
        }
        self.values.last().cloned()
    }
}

/// Animated value that transitions smoothly
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Retargets from wherever the value currently is.
    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now());
    }

    pub fn update(&mut self) -> bool {
        if let Some(start) = self.start_time {
            let elapsed = now().saturating_duration_since(start);

            if self.spec.is_finished(elapsed) {
                self.current = self.target.clone();
                self.start_time = None;
                return false; // Animation complete
            }

            let eased_t = self.spec.progress(elapsed);
            self.current = self.start.interpolate(&self.target, eased_t);

            true // Animation ongoing (or still waiting for delay)
        } else {
            false // No animation
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
