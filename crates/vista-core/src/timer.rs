//! # Timers
//!
//! A thread-local timer queue driven by the animation clock. The host pumps
//! it with [`run_due_timers`] after each clock advance (once per frame, or
//! after a test moves a [`TestClock`](crate::animation::TestClock)).
//!
//! Every timer is owned by the [`Dispose`] returned when it is created.
//! Running that handle removes the timer; a removed timer never fires again,
//! even if it was already due inside the current pump.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use vista_core::*;
//! use web_time::Duration;
//!
//! let clock = TestClock::install();
//! let fired = Rc::new(Cell::new(0));
//! let timer = set_interval(Duration::from_millis(100), {
//!     let fired = fired.clone();
//!     move || fired.set(fired.get() + 1)
//! });
//!
//! clock.advance(Duration::from_millis(250));
//! run_due_timers();
//! assert_eq!(fired.get(), 2);
//!
//! timer.run();
//! clock.advance(Duration::from_millis(500));
//! run_due_timers();
//! assert_eq!(fired.get(), 2);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::Dispose;
use crate::animation::now;

new_key_type! {
    pub struct TimerId;
}

/// Shortest allowed interval period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

enum Callback {
    Once(Option<Box<dyn FnOnce()>>),
    Repeat(Rc<RefCell<dyn FnMut()>>),
}

struct TimerEntry {
    due: Instant,
    period: Option<Duration>,
    callback: Callback,
}

thread_local! {
    static TIMERS: RefCell<SlotMap<TimerId, TimerEntry>> = RefCell::new(SlotMap::with_key());
}

fn insert(entry: TimerEntry) -> Dispose {
    let id = TIMERS.with(|t| t.borrow_mut().insert(entry));
    Dispose::new(move || cancel(id))
}

/// Runs `f` once, `delay` from now.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) -> Dispose {
    insert(TimerEntry {
        due: now() + delay,
        period: None,
        callback: Callback::Once(Some(Box::new(f))),
    })
}

/// Runs `f` every `period`, first `period` from now.
///
/// The schedule is fixed at creation: each firing is due exactly one period
/// after the previous due time, regardless of when the pump ran.
pub fn set_interval(period: Duration, f: impl FnMut() + 'static) -> Dispose {
    let period = period.max(MIN_PERIOD);
    log::debug!("interval registered ({period:?})");
    insert(TimerEntry {
        due: now() + period,
        period: Some(period),
        callback: Callback::Repeat(Rc::new(RefCell::new(f))),
    })
}

fn cancel(id: TimerId) {
    TIMERS.with(|t| {
        if t.borrow_mut().remove(id).is_some() {
            log::trace!("timer {id:?} cancelled");
        }
    });
}

enum Fire {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<RefCell<dyn FnMut()>>),
}

/// Takes the earliest timer due at `at` and reschedules or removes it.
fn pop_due(at: Instant) -> Option<Fire> {
    TIMERS.with(|t| {
        let mut timers = t.borrow_mut();
        let (id, _) = timers
            .iter()
            .filter(|(_, e)| e.due <= at)
            .min_by_key(|(_, e)| e.due)?;
        let entry = timers.get_mut(id)?;
        match entry.period {
            Some(period) => {
                entry.due += period;
                match &entry.callback {
                    Callback::Repeat(f) => Some(Fire::Repeat(f.clone())),
                    Callback::Once(_) => None,
                }
            }
            None => {
                let mut entry = timers.remove(id)?;
                match &mut entry.callback {
                    Callback::Once(f) => f.take().map(Fire::Once),
                    Callback::Repeat(_) => None,
                }
            }
        }
    })
}

/// Fires every timer due at the current clock time, earliest first, and
/// returns how many callbacks ran. An interval that fell several periods
/// behind fires once per missed period.
pub fn run_due_timers() -> usize {
    let at = now();
    let mut fired = 0;
    while let Some(fire) = pop_due(at) {
        match fire {
            Fire::Once(f) => f(),
            Fire::Repeat(f) => {
                let mut f = f.borrow_mut();
                (&mut *f)()
            }
        }
        fired += 1;
    }
    fired
}

/// Number of live timers on this thread.
pub fn pending_timers() -> usize {
    TIMERS.with(|t| t.borrow().len())
}

/// Earliest upcoming due time, if any timer is live.
pub fn next_deadline() -> Option<Instant> {
    TIMERS.with(|t| t.borrow().values().map(|e| e.due).min())
}
