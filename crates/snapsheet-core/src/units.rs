//! Snap-point values and unit conversion.
//!
//! A snap point is either an absolute pixel height or a percentage of the
//! viewport height. Plain numbers mean *percent* — that is the numeric
//! convention for snap points throughout the crate.

use crate::error::ConfigurationError;

/// A single height the sheet can settle at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPoint {
    /// Percentage of the viewport height (`Percent(50.0)` is half the viewport).
    Percent(f32),
    /// Absolute height in logical pixels.
    Pixels(f32),
}

impl SnapPoint {
    /// Resolve this snap point to pixels against the given viewport height.
    ///
    /// Resolution happens on every read; callers must not cache the result
    /// across viewport resizes.
    pub fn resolve(&self, viewport_height: f32) -> f32 {
        match *self {
            SnapPoint::Percent(percent) => viewport_height * percent / 100.0,
            SnapPoint::Pixels(pixels) => pixels,
        }
    }

    /// Parse a snap point from its string form.
    ///
    /// A `%` suffix selects percent (`"35%"`); any other numeric string is a
    /// pixel literal (`"420"`). The numeric part is extracted like
    /// `parseFloat`: leading float, trailing junk ignored. Input without a
    /// leading number is rejected here instead of turning into NaN later.
    pub fn parse(text: &str) -> Result<Self, ConfigurationError> {
        let trimmed = text.trim();
        let value = leading_float(trimmed)
            .ok_or_else(|| ConfigurationError::MalformedSnapPoint(text.to_string()))?;
        if trimmed.ends_with('%') {
            Ok(SnapPoint::Percent(value))
        } else {
            Ok(SnapPoint::Pixels(value))
        }
    }

    /// The raw numeric value, before any viewport resolution.
    pub fn raw_value(&self) -> f32 {
        match *self {
            SnapPoint::Percent(value) | SnapPoint::Pixels(value) => value,
        }
    }
}

/// Numbers are percent-of-viewport, matching the numeric snap-point form.
impl From<f32> for SnapPoint {
    fn from(percent: f32) -> Self {
        SnapPoint::Percent(percent)
    }
}

impl std::str::FromStr for SnapPoint {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnapPoint::parse(s)
    }
}

/// Extract the leading floating-point literal from `text`.
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// optional exponent. Returns `None` when no mantissa digits were consumed.
fn leading_float(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }

    let mut saw_digit = false;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
        saw_digit = true;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return None;
    }

    // The exponent is only consumed when digits actually follow it, so
    // "12e" parses as 12 with a trailing 'e'.
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > digits_start {
            pos = exp;
        }
    }

    text[..pos].parse().ok()
}
