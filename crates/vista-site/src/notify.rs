//! Transient toast notifications.

use std::cell::RefCell;
use std::rc::Rc;

use vista_core::now;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// How long a toast of this kind stays up.
    pub fn lifetime(self) -> Duration {
        match self {
            ToastKind::Success => Duration::from_millis(2_000),
            ToastKind::Error => Duration::from_millis(4_000),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.kind.lifetime()
    }
}

#[derive(Default)]
struct ToasterInner {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Toast queue shared by every form on the page. Clones share the queue.
#[derive(Clone, Default)]
pub struct Toaster {
    inner: Rc<RefCell<ToasterInner>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: ToastKind, message: &str) -> u64 {
        let at = now();
        let mut inner = self.inner.borrow_mut();
        inner.toasts.retain(|t| t.expires_at() > at);
        inner.next_id += 1;
        let id = inner.next_id;
        log::debug!("toast {id} ({kind:?}): {message}");
        inner.toasts.push(Toast {
            id,
            kind,
            message: message.to_owned(),
            shown_at: at,
        });
        id
    }

    pub fn success(&self, message: &str) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: &str) -> u64 {
        self.push(ToastKind::Error, message)
    }

    pub fn dismiss(&self, id: u64) {
        self.inner.borrow_mut().toasts.retain(|t| t.id != id);
    }

    /// Toasts still on screen, oldest first. Expired ones are dropped.
    pub fn visible(&self) -> Vec<Toast> {
        let at = now();
        let mut inner = self.inner.borrow_mut();
        inner.toasts.retain(|t| t.expires_at() > at);
        inner.toasts.clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.visible().into_iter().map(|t| t.message).collect()
    }

    /// Toasts held in the queue, including expired ones not yet dropped.
    pub fn queued(&self) -> usize {
        self.inner.borrow().toasts.len()
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("queued", &self.queued())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::TestClock;

    #[test]
    fn toasts_expire_by_kind() {
        let clock = TestClock::install();
        let toaster = Toaster::new();
        toaster.success("saved");
        toaster.error("broken");
        assert_eq!(toaster.visible().len(), 2);

        clock.advance(Duration::from_millis(2_000));
        assert_eq!(toaster.messages(), vec!["broken".to_owned()]);

        clock.advance(Duration::from_millis(2_000));
        assert!(toaster.visible().is_empty());
    }

    #[test]
    fn push_drops_expired_toasts() {
        let clock = TestClock::install();
        let toaster = Toaster::new();
        for _ in 0..5 {
            toaster.success("sent");
            clock.advance(Duration::from_millis(2_500));
        }
        assert_eq!(toaster.queued(), 1);

        toaster.error("failed");
        assert_eq!(toaster.queued(), 1);
        assert_eq!(toaster.messages(), vec!["failed".to_owned()]);
    }

    #[test]
    fn dismiss_removes_one() {
        let _clock = TestClock::install();
        let toaster = Toaster::new();
        let a = toaster.success("a");
        toaster.success("b");
        toaster.dismiss(a);
        assert_eq!(toaster.messages(), vec!["b".to_owned()]);
    }
}
