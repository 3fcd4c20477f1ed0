// SPDX-License-Identifier: Apache-2.0

use crate::engine::clean_rut_string;

/// Whether a stored RUT should show up for a search term.
///
/// Matches a case-insensitive substring of the stored text, and also a digit
/// term against the stored clean form so `12345` finds `12.345.678-5`.
#[must_use]
pub fn rut_matches(stored: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    if stored.to_lowercase().contains(&term.to_lowercase()) {
        return true;
    }

    let clean_term = clean_rut_string(term);
    if !clean_term.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    clean_rut_string(stored).contains(&clean_term)
}

/// Stored RUTs matching `term`, in their original order.
pub fn filter_ruts<'a, I>(stored: I, term: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    stored
        .into_iter()
        .filter(|candidate| rut_matches(candidate, term))
        .collect()
}
