// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{
    calculate_check_digit, checked_parts, clean_rut_string, group_thousands, MIN_CLEAN_LEN,
};
use crate::errors::{Error, Result};

/// A RUT whose check digit has been verified.
///
/// Serializes to the display form (`12.345.678-5`) that the account and
/// rental services store, and accepts any dirty form when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut {
    body: String,
    check_digit: char,
}

impl Rut {
    pub fn parse(input: &str) -> Result<Self> {
        let (body, check_digit) = checked_parts(input)?;
        Ok(Self { body, check_digit })
    }

    /// Builds a RUT from its body alone by computing the check digit.
    ///
    /// The body must be long enough for the result to pass [`Rut::parse`].
    pub fn from_body(body: &str) -> Result<Self> {
        let clean = clean_rut_string(body);
        let check_digit = calculate_check_digit(&clean).map_err(|_| Error::InvalidRut {
            value: body.to_owned(),
            reason: "body must contain only digits",
        })?;
        if clean.len() + 1 < MIN_CLEAN_LEN {
            return Err(Error::InvalidRut {
                value: body.to_owned(),
                reason: "body must have at least 7 digits",
            });
        }
        Ok(Self {
            body: clean,
            check_digit,
        })
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub const fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Separator-free form, e.g. `123456785`.
    #[must_use]
    pub fn clean(&self) -> String {
        let mut clean = String::with_capacity(self.body.len() + 1);
        clean.push_str(&self.body);
        clean.push(self.check_digit);
        clean
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", group_thousands(&self.body), self.check_digit)
    }
}

impl From<Rut> for String {
    fn from(value: Rut) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Rut {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Rut {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl FromStr for Rut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
