// SPDX-License-Identifier: Apache-2.0

//! Feedback state for a single RUT text input.
//!
//! The field reformats on every change and only judges the value once the
//! display form carries a hyphen, i.e. once there is a check digit to verify.

use std::fmt;

use crate::engine::{format_rut, validate_rut};
use crate::rut::Rut;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldError {
    /// Shown while typing once the value has a check digit that does not match.
    Invalid,
    /// Submitted empty.
    Required,
    /// Submitted with a value that does not validate.
    InvalidOnSubmit,
}

impl FieldError {
    /// User-facing message, in the storefront's language.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Invalid => "RUT inválido",
            Self::Required => "El RUT es obligatorio",
            Self::InvalidOnSubmit => "Por favor ingrese un RUT válido",
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Invalid | Self::InvalidOnSubmit => "RUT_INVALID",
            Self::Required => "RUT_REQUIRED",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RutField {
    value: String,
    error: Option<FieldError>,
}

impl RutField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value with the display form of `raw` and refreshes the error.
    pub fn on_change(&mut self, raw: &str) {
        self.value = format_rut(raw);
        self.error = if self.value.contains('-') && !validate_rut(&self.value) {
            Some(FieldError::Invalid)
        } else {
            None
        };
    }

    /// Final check before the value is sent anywhere.
    ///
    /// On failure the error is also kept on the field so it stays visible.
    pub fn submit(&mut self) -> Result<Rut, FieldError> {
        let outcome = if self.value.trim().is_empty() {
            Err(FieldError::Required)
        } else {
            Rut::parse(&self.value).map_err(|_| FieldError::InvalidOnSubmit)
        };
        self.error = outcome.as_ref().err().copied();
        outcome
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.error = None;
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn error(&self) -> Option<FieldError> {
        self.error
    }

    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.error.is_none()
    }
}
