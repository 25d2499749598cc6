//! Contact form state and validation.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::notify::Toaster;

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid regex"));

pub const SUBMIT_SUCCESS: &str = "Thank you! We will contact you soon.";
pub const SUBMIT_FAILED: &str = "Please fix the errors in the form";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Message,
}

/// Per-field validation failure. `Display` is the message shown under the
/// field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Please enter a valid 10-digit Indian mobile number")]
    PhoneNotIndianMobile,
    #[error("Please enter a valid 10-digit mobile number")]
    PhoneNotMobile,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

/// Where the form lives. The section clears itself right after a successful
/// submit; the popup keeps a submitted state until it closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormVariant {
    Section,
    Popup,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<FieldError>,
    pub phone: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name => self.name,
            Field::Phone => self.phone,
            Field::Message => self.message,
        }
    }

    fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Phone => self.phone = None,
            Field::Message => self.message = None,
        }
    }
}

/// A validated submission, trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub message: String,
}

pub fn validate_name(name: &str) -> Option<FieldError> {
    let name = name.trim();
    if name.is_empty() {
        Some(FieldError::NameRequired)
    } else if name.chars().count() < 2 {
        Some(FieldError::NameTooShort)
    } else {
        None
    }
}

pub fn validate_phone(phone: &str, variant: FormVariant) -> Option<FieldError> {
    let phone = phone.trim();
    if phone.is_empty() {
        Some(FieldError::PhoneRequired)
    } else if !MOBILE_NUMBER.is_match(phone) {
        Some(match variant {
            FormVariant::Section => FieldError::PhoneNotIndianMobile,
            FormVariant::Popup => FieldError::PhoneNotMobile,
        })
    } else {
        None
    }
}

pub fn validate_message(message: &str) -> Option<FieldError> {
    let message = message.trim();
    if message.is_empty() {
        Some(FieldError::MessageRequired)
    } else if message.chars().count() < 10 {
        Some(FieldError::MessageTooShort)
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    variant: FormVariant,
    name: String,
    phone: String,
    message: String,
    errors: FormErrors,
    submitted: bool,
}

impl ContactForm {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            name: String::new(),
            phone: String::new(),
            message: String::new(),
            errors: FormErrors::default(),
            submitted: false,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    /// Edits a field. Editing clears that field's error.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
        self.errors.clear(field);
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Validates every field and records the errors.
    pub fn validate(&mut self) -> bool {
        self.errors = FormErrors {
            name: validate_name(&self.name),
            phone: validate_phone(&self.phone, self.variant),
            message: validate_message(&self.message),
        };
        self.errors.is_empty()
    }

    /// Validates, raises the matching toast and returns the request on
    /// success.
    pub fn submit(&mut self, toaster: &Toaster) -> Option<ContactRequest> {
        if !self.validate() {
            log::debug!("contact form rejected: {:?}", self.errors);
            toaster.error(SUBMIT_FAILED);
            return None;
        }
        let request = ContactRequest {
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            message: self.message.trim().to_owned(),
        };
        toaster.success(SUBMIT_SUCCESS);
        match self.variant {
            FormVariant::Section => self.reset(),
            FormVariant::Popup => self.submitted = true,
        }
        Some(request)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.variant);
    }
}
