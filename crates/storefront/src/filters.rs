//! Custom Askama template filters.

use std::fmt::Display;

use chrono::Datelike;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Local::now().year())
}

/// Strips everything but digits, for `tel:` and `wa.me` links.
///
/// Usage in templates: `{{ profile.contact_number|digits }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn digits(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value
        .to_string()
        .chars()
        .filter(char::is_ascii_digit)
        .collect())
}
