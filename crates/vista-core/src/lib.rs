//! # Clock, Signals, Scopes and Timers
//!
//! Vista's core is a small single-threaded runtime shared by every motion
//! component. There are four main pieces:
//!
//! - `Clock`: the time source all animations and timers read (`now()`).
//! - `Signal<T>`: observable value with subscribers.
//! - `Scope` / `Dispose`: lifetime ownership of anything a mounted region
//!   acquires.
//! - `set_interval` / `set_timeout`: a timer queue pumped by the host.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use vista_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Animations as data
//!
//! An animation is a value: two states plus an `AnimationSpec`. Sampling it
//! is a pure function of elapsed time:
//!
//! ```rust
//! use vista_core::*;
//! use web_time::Duration;
//!
//! let fade = Tween::new(
//!     0.0f32,
//!     1.0,
//!     AnimationSpec::tween(Duration::from_millis(200), Easing::Linear),
//! );
//! assert_eq!(fade.sample(Duration::from_millis(100)), 0.5);
//! assert_eq!(fade.sample(Duration::from_secs(5)), 1.0);
//! ```
//!
//! ## Scopes and cleanup
//!
//! Everything with a lifetime (an autoplay timer, a viewport registration)
//! returns a `Dispose` handle. Tie it to the owning `Scope` and disposing the
//! scope tears everything down deterministically:
//!
//! ```rust
//! use vista_core::*;
//! use web_time::Duration;
//!
//! let _clock = TestClock::install();
//! let scope = Scope::new();
//! scope.adopt(set_interval(Duration::from_secs(5), || {}));
//! assert_eq!(pending_timers(), 1);
//!
//! scope.dispose();
//! assert_eq!(pending_timers(), 0);
//! ```

pub mod animation;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod motion;
pub mod prelude;
pub mod scope;
pub mod signal;
pub mod timer;

mod tests;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use prelude::*;
pub use signal::*;
pub use timer::*;
