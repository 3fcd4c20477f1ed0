// SPDX-License-Identifier: Apache-2.0

//! String-level RUT operations.
//!
//! Every function here accepts whatever a user may have typed and degrades to
//! `false`, `""` or the best-effort clean form instead of failing. The only
//! fallible entry point is [`calculate_check_digit`], whose caller owns the
//! job of passing a pre-cleaned digit string.

use crate::errors::{Error, Result};

/// Shortest clean form (body plus check digit) accepted as a complete RUT.
pub const MIN_CLEAN_LEN: usize = 8;

const FIRST_WEIGHT: u32 = 2;
const LAST_WEIGHT: u32 = 7;
const MODULUS: u32 = 11;

/// Strips separators, uppercases, and keeps only digits and `K`.
#[must_use]
pub fn clean_rut_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_digit() || *c == 'K')
        .collect()
}

/// Modulo-11 check digit of a bare digit body.
///
/// Digits are weighted right to left with the cycle 2,3,4,5,6,7. A result of
/// 11 maps to `'0'` and 10 maps to `'K'`.
pub fn calculate_check_digit(body: &str) -> Result<char> {
    if body.is_empty() {
        return Err(Error::InvalidArgument {
            value: body.to_owned(),
            reason: "body must not be empty",
        });
    }

    let mut sum = 0_u32;
    let mut weight = FIRST_WEIGHT;
    for c in body.chars().rev() {
        let digit = c.to_digit(10).ok_or_else(|| Error::InvalidArgument {
            value: body.to_owned(),
            reason: "body must contain only decimal digits",
        })?;
        // Reducing as we go keeps arbitrarily long bodies from overflowing.
        sum = (sum + digit * weight) % MODULUS;
        weight = if weight == LAST_WEIGHT {
            FIRST_WEIGHT
        } else {
            weight + 1
        };
    }

    Ok(match MODULUS - sum {
        11 => '0',
        10 => 'K',
        // 1..=9
        raw => char::from(b'0' + raw as u8),
    })
}

/// Whether `input`, once cleaned, is a complete RUT with a matching check digit.
#[must_use]
pub fn validate_rut(input: &str) -> bool {
    checked_parts(input).is_ok()
}

/// Display form: dot-grouped body, hyphen, check digit (`12.345.678-9`).
///
/// Inputs whose clean form has one character or less come back cleaned but
/// otherwise untouched.
#[must_use]
pub fn format_rut(input: &str) -> String {
    let clean = clean_rut_string(input);
    if clean.len() <= 1 {
        return clean;
    }
    let (body, dv) = clean.split_at(clean.len() - 1);
    format!("{}-{dv}", group_thousands(body))
}

/// Everything but the last character of the clean form.
#[must_use]
pub fn rut_body(input: &str) -> String {
    let mut clean = clean_rut_string(input);
    clean.pop();
    clean
}

/// Last character of the clean form, or `""`.
#[must_use]
pub fn rut_dv(input: &str) -> String {
    clean_rut_string(input)
        .chars()
        .last()
        .map(String::from)
        .unwrap_or_default()
}

/// Equality on clean forms.
#[must_use]
pub fn compare_ruts(a: &str, b: &str) -> bool {
    clean_rut_string(a) == clean_rut_string(b)
}

/// Appends the computed check digit to a bare body and returns the display form.
///
/// Returns `None` when the clean body is empty or still carries a `K`.
#[must_use]
pub fn complete_rut(body: &str) -> Option<String> {
    let clean = clean_rut_string(body);
    let dv = calculate_check_digit(&clean).ok()?;
    Some(format!("{}-{dv}", group_thousands(&clean)))
}

/// Clean body and uppercase check digit of a complete, correct RUT.
pub(crate) fn checked_parts(input: &str) -> Result<(String, char)> {
    let clean = clean_rut_string(input);
    let invalid = |reason| Error::InvalidRut {
        value: input.to_owned(),
        reason,
    };

    if clean.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if clean.len() < MIN_CLEAN_LEN {
        return Err(invalid("must have at least 8 characters"));
    }

    let (body, dv) = clean.split_at(clean.len() - 1);
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("body must contain only digits"));
    }
    // clean forms hold only digits and `K`
    let provided = dv.chars().next().ok_or_else(|| invalid("must not be empty"))?;

    let expected = calculate_check_digit(body)?;
    if expected != provided {
        return Err(Error::CheckDigitMismatch {
            value: input.to_owned(),
            expected,
            provided,
        });
    }
    Ok((body.to_owned(), provided))
}

pub(crate) fn group_thousands(body: &str) -> String {
    let len = body.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
