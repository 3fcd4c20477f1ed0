// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    Internal = 10,
}

impl ExitCode {
    /// Process exit status.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A checksum primitive was handed something other than a digit string.
    InvalidArgument {
        value: String,
        reason: &'static str,
    },
    /// The input does not have the shape of a RUT.
    InvalidRut {
        value: String,
        reason: &'static str,
    },
    /// Well formed, but the trailing check digit is wrong.
    CheckDigitMismatch {
        value: String,
        expected: char,
        provided: char,
    },
}

impl Error {
    /// Stable snake_case code used in machine-readable output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::InvalidRut { .. } => "invalid_rut",
            Self::CheckDigitMismatch { .. } => "check_digit_mismatch",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { value, reason } => {
                write!(f, "invalid argument `{value}`: {reason}")
            }
            Self::InvalidRut { value, reason } => write!(f, "invalid rut `{value}`: {reason}"),
            Self::CheckDigitMismatch {
                value,
                expected,
                provided,
            } => write!(
                f,
                "invalid rut `{value}`: check digit is {provided}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// A `usage_error`, reported with exit code 2.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new("usage_error", message)
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_owned(), value.into());
        self
    }

    /// The offending RUT text, when the error came from one.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.details.get("input").map(String::as_str)
    }
}

impl From<&Error> for MachineError {
    fn from(value: &Error) -> Self {
        let machine = Self::new(value.code(), value.to_string());
        match value {
            Error::InvalidArgument { value, .. } | Error::InvalidRut { value, .. } => {
                machine.with_detail("input", value.as_str())
            }
            Error::CheckDigitMismatch {
                value,
                expected,
                provided,
            } => machine
                .with_detail("input", value.as_str())
                .with_detail("expected", expected.to_string())
                .with_detail("provided", provided.to_string()),
        }
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}
