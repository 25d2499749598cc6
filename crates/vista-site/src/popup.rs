//! The contact popup: opens on its own a few seconds after the page mounts,
//! and closes itself a moment after a successful submit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vista_core::{
    AnimatedValue, AnimationSpec, Dispose, Easing, MotionState, Scope, Signal, set_timeout, signal,
};
use vista_motion::DismissReason;
use web_time::Duration;

use crate::config::Timing;
use crate::contact::{ContactForm, ContactRequest, Field, FormVariant};
use crate::notify::Toaster;

const CARD_HIDDEN: MotionState = MotionState {
    opacity: 0.0,
    y: 30.0,
    scale: 0.9,
    ..MotionState::VISIBLE
};

struct PopupInner {
    scope: Scope,
    open: Signal<bool>,
    form: RefCell<ContactForm>,
    toaster: Toaster,
    reset_delay: Duration,
    reset_timer: RefCell<Option<Dispose>>,
    backdrop: RefCell<AnimatedValue<f32>>,
    card: RefCell<AnimatedValue<MotionState>>,
}

impl PopupInner {
    fn set_open(&self, open: bool) {
        if self.open.get() == open {
            return;
        }
        let (backdrop, card) = if open {
            (1.0, MotionState::VISIBLE)
        } else {
            (0.0, CARD_HIDDEN)
        };
        self.backdrop.borrow_mut().set_target(backdrop);
        self.card.borrow_mut().set_target(card);
        self.open.set(open);
    }
}

#[derive(Clone)]
pub struct ContactPopup {
    inner: Rc<PopupInner>,
}

impl std::fmt::Debug for ContactPopup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactPopup")
            .field("open", &self.is_open())
            .field("form", &self.inner.form.borrow())
            .finish()
    }
}

impl ContactPopup {
    pub fn mount(parent: &Scope, toaster: Toaster, timing: &Timing) -> Self {
        let fade = AnimationSpec::tween(Duration::from_millis(300), Easing::EaseOut);
        let inner = Rc::new(PopupInner {
            scope: parent.child(),
            open: signal(false),
            form: RefCell::new(ContactForm::new(FormVariant::Popup)),
            toaster,
            reset_delay: timing.form_reset_delay(),
            reset_timer: RefCell::new(None),
            backdrop: RefCell::new(AnimatedValue::new(0.0, fade)),
            card: RefCell::new(AnimatedValue::new(CARD_HIDDEN, fade)),
        });

        let weak = Rc::downgrade(&inner);
        inner.scope.adopt(set_timeout(timing.popup_delay(), move || {
            if let Some(inner) = weak.upgrade() {
                log::debug!("contact popup shown");
                inner.set_open(true);
            }
        }));
        Self { inner }
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.inner.open.clone()
    }

    /// Opens right away, e.g. from a "Book a Visit" button.
    pub fn open(&self) {
        if self.inner.scope.is_disposed() {
            return;
        }
        self.inner.set_open(true);
    }

    pub fn close(&self, reason: DismissReason) {
        if self.is_open() {
            log::debug!("contact popup closed ({reason:?})");
        }
        self.inner.set_open(false);
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.inner.form.borrow_mut().set(field, value);
    }

    pub fn form(&self) -> ContactForm {
        self.inner.form.borrow().clone()
    }

    pub fn is_submitted(&self) -> bool {
        self.inner.form.borrow().is_submitted()
    }

    /// Submits the form. On success the popup shows its thank-you state,
    /// then clears the form and closes after the reset delay.
    pub fn submit(&self) -> Option<ContactRequest> {
        if self.is_submitted() || self.inner.scope.is_disposed() {
            return None;
        }
        let request = self.inner.form.borrow_mut().submit(&self.inner.toaster)?;

        let weak: Weak<PopupInner> = Rc::downgrade(&self.inner);
        let timer = set_timeout(self.inner.reset_delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.form.borrow_mut().reset();
                inner.set_open(false);
                inner.reset_timer.borrow_mut().take();
            }
        });
        self.inner.scope.adopt(timer.clone());
        if let Some(previous) = self.inner.reset_timer.borrow_mut().replace(timer) {
            previous.run();
        }
        Some(request)
    }

    /// Backdrop opacity and card motion for this frame.
    pub fn motion(&self) -> (f32, MotionState) {
        let mut backdrop = self.inner.backdrop.borrow_mut();
        let mut card = self.inner.card.borrow_mut();
        backdrop.update();
        card.update();
        (*backdrop.get(), *card.get())
    }

    pub fn unmount(&self) {
        self.inner.scope.dispose();
    }
}
