//! # Decorative motion
//!
//! Ambient loops drawn behind page content: floating shapes, rising
//! particles and hearts, morphing blobs, a drifting wave, and scroll
//! parallax. Nothing here reads or writes application state.
//!
//! Every table is a pure function of its index. There is no randomness, so
//! two renders of the same layer at the same elapsed time are identical.
//!
//! ```rust
//! use vista_motion::decorative::*;
//! use web_time::Duration;
//!
//! let a = floating_shapes(8);
//! let b = floating_shapes(8);
//! let t = Duration::from_millis(7_250);
//! assert_eq!(a[3].motion.sample(t), b[3].motion.sample(t));
//! ```

use vista_core::{Color, Easing, Interpolate, Keyframes, MotionState, Rect, Vec2, now};
use web_time::{Duration, Instant};

use crate::viewport::Viewport;

/// A keyframe track repeated forever after an initial delay.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopingMotion<T: Interpolate + Clone = MotionState> {
    pub delay: Duration,
    pub period: Duration,
    pub track: Keyframes<T>,
}

impl<T: Interpolate + Clone + Default> LoopingMotion<T> {
    pub fn new(delay: Duration, period: Duration, track: Keyframes<T>) -> Self {
        Self {
            delay,
            period,
            track,
        }
    }

    /// Position inside the current cycle, in `[0, 1)`. Zero during the delay.
    pub fn phase(&self, elapsed: Duration) -> f32 {
        let Some(t) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.period.is_zero() {
            return 0.0;
        }
        let period = self.period.as_nanos();
        ((t.as_nanos() % period) as f64 / period as f64) as f32
    }

    /// Completed cycles at `elapsed`.
    pub fn cycles(&self, elapsed: Duration) -> u64 {
        match elapsed.checked_sub(self.delay) {
            Some(t) if !self.period.is_zero() => (t.as_nanos() / self.period.as_nanos()) as u64,
            _ => 0,
        }
    }

    pub fn sample(&self, elapsed: Duration) -> T {
        self.track
            .sample(self.phase(elapsed))
            .unwrap_or_default()
    }
}

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Corners {
    Circle,
    Rounded(f32),
}

/// Soft shape drifting in place.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingShape {
    pub top_percent: f32,
    pub left_percent: f32,
    pub width: f32,
    pub height: f32,
    pub corners: Corners,
    pub color: Color,
    pub opacity: f32,
    pub motion: LoopingMotion,
}

const SHAPE_SLOTS: [(f32, f32, f32, f32, Corners); 10] = [
    (8.0, 12.0, 80.0, 80.0, Corners::Circle),
    (25.0, 78.0, 120.0, 60.0, Corners::Rounded(30.0)),
    (60.0, 5.0, 100.0, 100.0, Corners::Circle),
    (75.0, 85.0, 60.0, 60.0, Corners::Circle),
    (15.0, 45.0, 90.0, 45.0, Corners::Rounded(22.0)),
    (50.0, 35.0, 70.0, 70.0, Corners::Circle),
    (35.0, 90.0, 50.0, 50.0, Corners::Circle),
    (85.0, 55.0, 110.0, 55.0, Corners::Rounded(28.0)),
    (45.0, 65.0, 65.0, 65.0, Corners::Circle),
    (10.0, 30.0, 55.0, 55.0, Corners::Circle),
];

/// Pink, lilac, champagne, lavender, soft pink.
fn shape_color(i: usize) -> Color {
    match i % 5 {
        0 => Color::from_rgba_f32(255, 111, 174, 0.06),
        1 => Color::from_rgba_f32(205, 180, 255, 0.08),
        2 => Color::from_rgba_f32(247, 217, 196, 0.05),
        3 => Color::from_rgba_f32(233, 213, 255, 0.08),
        _ => Color::from_rgba_f32(255, 214, 231, 0.05),
    }
}

/// Up to ten shapes at fixed slots.
pub fn floating_shapes(count: usize) -> Vec<FloatingShape> {
    SHAPE_SLOTS
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, &(top, left, w, h, corners))| {
            let opacity = 0.1 + (i % 3) as f32 * 0.05;
            let ys = [0.0, -15.0, 10.0, -8.0, 0.0];
            let xs = [0.0, 8.0, -5.0, 12.0, 0.0];
            let rotations = [0.0, 3.0, -2.0, 4.0, 0.0];
            let scales = [1.0, 1.05, 0.95, 1.02, 1.0];
            let frames = (0..5).map(|k| MotionState {
                opacity,
                x: xs[k],
                y: ys[k],
                x_percent: 0.0,
                scale: scales[k],
                rotate: rotations[k],
            });
            FloatingShape {
                top_percent: top,
                left_percent: left,
                width: w,
                height: h,
                corners,
                color: shape_color(i),
                opacity,
                motion: LoopingMotion::new(
                    secs(i as f32 * 0.8),
                    secs(6.0 + (i % 4) as f32 * 2.0),
                    Keyframes::new(frames, Easing::EaseInOut),
                ),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub size: f32,
    pub left_percent: f32,
    /// Opacity of the element; the track's opacity is applied on top.
    pub opacity: f32,
    pub motion: LoopingMotion,
}

/// Dots rising from below the container to one viewport height above it,
/// growing from nothing and fading out near the top.
pub fn particles(count: usize, viewport_height: f32) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let size = 3.0 + (i % 4) as f32 * 2.0;
            let times = [0.0, 0.1, 0.9, 1.0];
            let fades = [0.0, 1.0, 0.6, 0.0];
            let frames = times.iter().zip(fades).map(|(&t, opacity)| MotionState {
                opacity,
                y: size.interpolate(&-viewport_height, t),
                scale: t,
                ..MotionState::VISIBLE
            });
            Particle {
                size,
                left_percent: (i as f32 * 7.3) % 100.0,
                opacity: 0.3 + (i % 3) as f32 * 0.15,
                motion: LoopingMotion::new(
                    secs(i as f32 * 0.6),
                    secs(6.0 + (i % 5) as f32 * 2.0),
                    Keyframes::with_times(frames, times, Easing::Linear),
                ),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingHeart {
    pub left_percent: f32,
    pub size: f32,
    pub sway: f32,
    pub motion: LoopingMotion,
}

/// `(left %, size, delay s, duration s, sway px)`
const HEART_ROWS: [(f32, f32, f32, f32, f32); 12] = [
    (5.0, 16.0, 0.0, 16.0, 20.0),
    (12.0, 12.0, 2.0, 20.0, -15.0),
    (20.0, 18.0, 5.0, 18.0, 25.0),
    (30.0, 10.0, 1.5, 22.0, -18.0),
    (38.0, 14.0, 7.0, 17.0, 12.0),
    (48.0, 20.0, 3.0, 20.0, -22.0),
    (55.0, 12.0, 9.0, 19.0, 16.0),
    (65.0, 16.0, 1.0, 16.0, -20.0),
    (72.0, 14.0, 6.0, 22.0, 14.0),
    (80.0, 18.0, 0.5, 18.0, -25.0),
    (88.0, 10.0, 4.0, 20.0, 18.0),
    (95.0, 16.0, 8.0, 17.0, -12.0),
];

/// Hearts rising like bubbles through 110% of the viewport, swaying side
/// to side.
pub fn floating_hearts(viewport_height: f32) -> Vec<FloatingHeart> {
    let rise = -1.1 * viewport_height;
    let times = [0.0, 0.25, 0.5, 0.75, 1.0];
    HEART_ROWS
        .iter()
        .map(|&(left, size, delay, duration, sway)| {
            let xs = [0.0, sway, 0.0, -sway, 0.0];
            let rotations = [0.0, 20.0, -20.0, 10.0, 0.0];
            let scales = [0.5, 1.0, 1.1, 1.0, 0.6];
            let fades = [0.0, 0.35, 0.4, 0.3, 0.0];
            let frames = (0..5).map(|k| MotionState {
                opacity: fades[k],
                x: xs[k],
                y: rise * times[k],
                x_percent: 0.0,
                scale: scales[k],
                rotate: rotations[k],
            });
            FloatingHeart {
                left_percent: left,
                size,
                sway,
                motion: LoopingMotion::new(
                    secs(delay),
                    secs(duration),
                    Keyframes::with_times(frames, times, Easing::Linear),
                ),
            }
        })
        .collect()
}

/// Eight border radii in percent: four horizontal, then four vertical.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlobShape(pub [f32; 8]);

impl Interpolate for BlobShape {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        let mut out = [0.0; 8];
        for (k, r) in out.iter_mut().enumerate() {
            *r = self.0[k].interpolate(&other.0[k], t);
        }
        BlobShape(out)
    }
}

const BLOB_FRAMES: [BlobShape; 5] = [
    BlobShape([60.0, 40.0, 30.0, 70.0, 60.0, 30.0, 70.0, 40.0]),
    BlobShape([30.0, 60.0, 70.0, 40.0, 50.0, 60.0, 30.0, 60.0]),
    BlobShape([50.0, 60.0, 30.0, 60.0, 40.0, 70.0, 60.0, 30.0]),
    BlobShape([40.0, 30.0, 60.0, 50.0, 60.0, 40.0, 70.0, 50.0]),
    BlobShape([60.0, 40.0, 30.0, 70.0, 60.0, 30.0, 70.0, 40.0]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlobCorner {
    TopRight,
    BottomLeft,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrganicBlob {
    pub corner: BlobCorner,
    /// How far the blob hangs outside its container.
    pub overhang: f32,
    pub size: f32,
    pub gradient: [Color; 2],
    pub morph: LoopingMotion<BlobShape>,
}

/// A lavender blob top-right and a slower peach one bottom-left.
pub fn organic_blobs() -> [OrganicBlob; 2] {
    let track = || Keyframes::new(BLOB_FRAMES, Easing::EaseInOut);
    [
        OrganicBlob {
            corner: BlobCorner::TopRight,
            overhang: 80.0,
            size: 500.0,
            gradient: [
                Color::from_rgba_f32(205, 180, 255, 0.08),
                Color::from_rgba_f32(255, 214, 231, 0.06),
            ],
            morph: LoopingMotion::new(Duration::ZERO, secs(8.0), track()),
        },
        OrganicBlob {
            corner: BlobCorner::BottomLeft,
            overhang: 96.0,
            size: 400.0,
            gradient: [
                Color::from_rgba_f32(255, 111, 174, 0.06),
                Color::from_rgba_f32(255, 249, 252, 0.08),
            ],
            morph: LoopingMotion::new(secs(4.0), secs(12.0), track()),
        },
    ]
}

/// Section-divider wave: a double-width strip sliding half its width.
pub fn wave() -> LoopingMotion {
    let frames = [0.0, -25.0, -50.0].map(|p| MotionState::VISIBLE.with_x_percent(p));
    LoopingMotion::new(Duration::ZERO, secs(15.0), Keyframes::new(frames, Easing::Linear))
}

/// Progress of `container` through the viewport: 0 when its top meets the
/// bottom edge, 1 when its bottom meets the top edge.
pub fn scroll_progress(container: Rect, viewport: Viewport) -> f32 {
    let travel = viewport.height + container.h;
    if travel <= 0.0 {
        return 0.0;
    }
    let entered = viewport.scroll_y + viewport.height - container.y;
    (entered / travel).clamp(0.0, 1.0)
}

pub fn parallax_offset(progress: f32, speed: f32) -> f32 {
    -100.0 * speed * progress.clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    pub speed: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self { speed: 0.3 }
    }
}

impl Parallax {
    pub fn motion(&self, container: Rect, viewport: Viewport) -> MotionState {
        let y = parallax_offset(scroll_progress(container, viewport), self.speed);
        MotionState::VISIBLE.with_offset(0.0, y)
    }
}

/// Pointer position inside `container` in percent, for the cursor spotlight.
pub fn spotlight_position(container: Rect, pointer: Vec2) -> Option<Vec2> {
    if container.is_empty() {
        return None;
    }
    Some(Vec2 {
        x: (pointer.x - container.x) / container.w * 100.0,
        y: (pointer.y - container.y) / container.h * 100.0,
    })
}

/// One frame of every loop in a [`DecorativeLayer`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorativeFrame {
    pub shapes: Vec<MotionState>,
    pub particles: Vec<MotionState>,
    pub hearts: Vec<MotionState>,
    pub blobs: Vec<BlobShape>,
    pub wave: MotionState,
}

/// All ambient loops of one section, timed from the moment it was built.
#[derive(Clone, Debug)]
pub struct DecorativeLayer {
    pub shapes: Vec<FloatingShape>,
    pub particles: Vec<Particle>,
    pub hearts: Vec<FloatingHeart>,
    pub blobs: Vec<OrganicBlob>,
    pub wave: LoopingMotion,
    started_at: Instant,
}

impl DecorativeLayer {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            shapes: floating_shapes(8),
            particles: particles(15, viewport_height),
            hearts: floating_hearts(viewport_height),
            blobs: organic_blobs().into(),
            wave: wave(),
            started_at: now(),
        }
    }

    pub fn with_shapes(mut self, count: usize) -> Self {
        self.shapes = floating_shapes(count);
        self
    }

    pub fn with_particles(mut self, count: usize, viewport_height: f32) -> Self {
        self.particles = particles(count, viewport_height);
        self
    }

    pub fn without_hearts(mut self) -> Self {
        self.hearts.clear();
        self
    }

    pub fn elapsed(&self) -> Duration {
        now().saturating_duration_since(self.started_at)
    }

    pub fn sample(&self, elapsed: Duration) -> DecorativeFrame {
        DecorativeFrame {
            shapes: self.shapes.iter().map(|s| s.motion.sample(elapsed)).collect(),
            particles: self
                .particles
                .iter()
                .map(|p| {
                    let m = p.motion.sample(elapsed);
                    m.with_opacity(m.opacity * p.opacity)
                })
                .collect(),
            hearts: self.hearts.iter().map(|h| h.motion.sample(elapsed)).collect(),
            blobs: self.blobs.iter().map(|b| b.morph.sample(elapsed)).collect(),
            wave: self.wave.sample(elapsed),
        }
    }

    pub fn frame(&self) -> DecorativeFrame {
        self.sample(self.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn shape_table() {
        let shapes = floating_shapes(20);
        assert_eq!(shapes.len(), 10);
        assert_eq!(shapes[5].motion.delay, secs(4.0));
        assert_eq!(shapes[3].motion.period, secs(12.0));
        assert_eq!(shapes[4].motion.period, secs(6.0));
        assert!((shapes[2].opacity - 0.2).abs() < 1e-6);
        assert_eq!(shapes[1].corners, Corners::Rounded(30.0));
        assert_eq!(shapes[6].color, shapes[1].color);
    }

    #[test]
    fn loop_holds_first_frame_during_delay_and_repeats() {
        let shape = &floating_shapes(3)[2];
        let first = shape.motion.sample(Duration::ZERO);
        assert_eq!(first.y, 0.0);
        assert_eq!(shape.motion.sample(ms(1_500)), first);

        let period = shape.motion.period;
        let delay = shape.motion.delay;
        let t = delay + ms(2_345);
        assert_eq!(shape.motion.sample(t), shape.motion.sample(t + period * 3));
        assert_eq!(shape.motion.cycles(t + period * 3), 3);
    }

    #[test]
    fn particle_rises_and_fades() {
        let p = &particles(4, 800.0)[0];
        assert_eq!(p.size, 3.0);
        let start = p.motion.sample(Duration::ZERO);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.scale, 0.0);
        let mid = p.motion.sample(p.motion.period / 2);
        assert!(mid.y < 0.0 && mid.opacity > 0.6);
        let end = p.motion.sample(p.motion.period - ms(1));
        assert!(end.y < -790.0);

        let table = particles(12, 800.0);
        assert!((table[11].left_percent - 80.3).abs() < 1e-3);
        assert!((table[2].opacity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn hearts_sway_both_ways() {
        let hearts = floating_hearts(1000.0);
        assert_eq!(hearts.len(), 12);
        let h = &hearts[0];
        let quarter = h.motion.sample(h.motion.period / 4);
        let three_quarters = h.motion.sample(h.motion.period * 3 / 4);
        assert!((quarter.x - 20.0).abs() < 1e-3);
        assert!((three_quarters.x + 20.0).abs() < 1e-3);
        assert!((quarter.y + 275.0).abs() < 1e-2);
    }

    #[test]
    fn slow_blob_waits_for_its_delay() {
        let [fast, slow] = organic_blobs();
        assert_eq!(slow.morph.sample(ms(3_000)), BLOB_FRAMES[0]);
        assert_ne!(fast.morph.sample(ms(3_000)), BLOB_FRAMES[0]);
        assert_eq!(fast.morph.sample(ms(2_000)), BLOB_FRAMES[1]);
    }

    #[test]
    fn wave_slides_half_its_width() {
        let w = wave();
        assert_eq!(w.sample(Duration::ZERO).x_percent, 0.0);
        assert!((w.sample(secs(7.5)).x_percent + 25.0).abs() < 1e-3);
        assert_eq!(w.sample(secs(15.0)).x_percent, 0.0);
    }

    #[test]
    fn parallax_follows_scroll_progress() {
        let container = Rect::new(0.0, 1000.0, 1280.0, 400.0);
        let above = Viewport::new(0.0, 1280.0, 800.0);
        assert_eq!(scroll_progress(container, above), 0.0);
        let halfway = Viewport::new(800.0, 1280.0, 800.0);
        assert!((scroll_progress(container, halfway) - 0.5).abs() < 1e-6);
        let past = Viewport::new(2000.0, 1280.0, 800.0);
        assert_eq!(scroll_progress(container, past), 1.0);

        assert!((parallax_offset(1.0, 0.3) + 30.0).abs() < 1e-6);
        let m = Parallax::default().motion(container, halfway);
        assert!((m.y + 15.0).abs() < 1e-4);
    }

    #[test]
    fn spotlight_in_percent() {
        let r = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            spotlight_position(r, Vec2 { x: 150.0, y: 175.0 }),
            Some(Vec2 { x: 25.0, y: 75.0 })
        );
        assert_eq!(
            spotlight_position(Rect::new(0.0, 0.0, 0.0, 10.0), Vec2 { x: 0.0, y: 0.0 }),
            None
        );
    }

    #[test]
    fn layer_is_deterministic() {
        let _clock = vista_core::TestClock::install();
        let a = DecorativeLayer::new(800.0);
        let b = DecorativeLayer::new(800.0);
        for t in [0, 1_250, 9_999, 61_000] {
            assert_eq!(a.sample(ms(t)), b.sample(ms(t)));
        }
        assert_eq!(a.frame(), a.sample(Duration::ZERO));
    }
}
