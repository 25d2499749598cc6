//! # Vista site
//!
//! Puts the motion layer together into a property page: static
//! configuration, the contact form and popup, toasts, the navbar and the
//! section choreography.
//!
//! ```rust
//! use vista_core::*;
//! use vista_motion::Viewport;
//! use vista_site::*;
//!
//! let clock = TestClock::install();
//! let mut page = Page::mount(SiteConfig::default(), Viewport::new(0.0, 1280.0, 800.0)).unwrap();
//! page.layout(SectionId::About, Rect::new(0.0, 900.0, 1280.0, 700.0));
//!
//! page.scroll(Viewport::new(600.0, 1280.0, 800.0));
//! assert!(page.navbar().is_scrolled());
//!
//! clock.advance(web_time::Duration::from_secs(3));
//! page.tick();
//! assert!(page.popup().is_open());
//! ```

pub mod config;
pub mod contact;
pub mod error;
pub mod nav;
pub mod notify;
pub mod page;
pub mod popup;

mod tests;

pub use config::{College, ContactDetails, SectionConfig, SectionId, SiteConfig, Timing};
pub use contact::{
    ContactForm, ContactRequest, Field, FieldError, FormErrors, FormVariant, SUBMIT_FAILED,
    SUBMIT_SUCCESS,
};
pub use error::SiteError;
pub use nav::{NavItem, Navbar, SCROLLED_BACKGROUND, SectionAnchors};
pub use notify::{Toast, ToastKind, Toaster};
pub use page::{Page, RevealPart, SectionMotion};
pub use popup::ContactPopup;
