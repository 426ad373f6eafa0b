//! Extension number value type
//!
//! An extension is the digit string a phone dials inside a context. Plain
//! extensions are all digits and carry a numeric value used by the dial-plan
//! range checks. Pattern extensions (Asterisk-style, leading `_`) match
//! classes of numbers and have no single numeric value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KernelError;

/// Characters permitted inside a dial pattern after the leading underscore.
///
/// `X` any digit, `Z` 1-9, `N` 2-9, `.` one-or-more wildcard, `!` zero-or-more
/// wildcard, plus literal digits, `*`, `#` and bracketed digit sets.
const PATTERN_CHARS: &str = "XZN.!*#[]-0123456789";

/// An extension number as dialed inside a context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtenNumber(String);

impl ExtenNumber {
    /// Parses an extension, accepting plain digit strings and dial patterns
    ///
    /// # Errors
    ///
    /// Returns `KernelError::Input` for empty strings, digit strings that do
    /// not fit in a u32, or patterns containing characters outside the
    /// pattern alphabet.
    pub fn parse(raw: &str) -> Result<Self, KernelError> {
        if raw.is_empty() {
            return Err(KernelError::input("extension cannot be empty"));
        }

        if let Some(body) = raw.strip_prefix('_') {
            if body.is_empty() {
                return Err(KernelError::input("extension pattern cannot be empty"));
            }
            if let Some(c) = body
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .find(|c| !PATTERN_CHARS.contains(*c))
            {
                return Err(KernelError::input(format!(
                    "invalid character '{}' in extension pattern '{}'",
                    c, raw
                )));
            }
            return Ok(Self(raw.to_string()));
        }

        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(KernelError::input(format!(
                "extension '{}' must contain only digits",
                raw
            )));
        }
        raw.parse::<u32>()
            .map_err(|_| KernelError::input(format!("extension '{}' is out of range", raw)))?;

        Ok(Self(raw.to_string()))
    }

    /// Returns true for Asterisk-style dial patterns (`_` prefix)
    pub fn is_pattern(&self) -> bool {
        self.0.starts_with('_')
    }

    /// Numeric value of a plain extension, `None` for patterns
    pub fn value(&self) -> Option<u32> {
        if self.is_pattern() {
            None
        } else {
            self.0.parse().ok()
        }
    }

    /// The extension exactly as dialed
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtenNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExtenNumber {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
