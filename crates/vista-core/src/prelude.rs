pub use crate::animation::{
    AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, Keyframes, TestClock, Tween,
    now, set_clock,
};
pub use crate::color::Color;
pub use crate::effects::Dispose;
pub use crate::geometry::{Rect, Transform, Vec2};
pub use crate::motion::MotionState;
pub use crate::scope::Scope;
pub use crate::signal::{Signal, signal};
pub use crate::timer::{next_deadline, pending_timers, run_due_timers, set_interval, set_timeout};
