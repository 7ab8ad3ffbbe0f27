//! Local input rules checked before anything is handed to the relay.
//!
//! The email rule is a shape check, not address parsing. Its tolerance is
//! part of the contract:
//! - it accepts some addresses no mail server would (`x@@@@.@@`, embedded
//!   spaces, several `@`), because the pattern is unanchored;
//! - it rejects real addresses whose domain label before the last dot, or
//!   whose top-level label, is a single character (`a@b.c`, `me@x.io`);
//! - lengths are counted in chars, so an astral char such as `😀` counts
//!   once. A UTF-16 based check would accept `a@😀.😀`; this one does not.

use std::sync::LazyLock;

use regex::Regex;
use shared::{domain::ContactPayload, error::ValidationError};

/// One or more chars, `@`, two or more chars, a literal `.`, two or more
/// chars. Unanchored; no part may contain a line terminator (`\n`, `\r`,
/// U+2028, U+2029).
pub const EMAIL_PATTERN: &str = r"[^\n\r\x{2028}\x{2029}]+@[^\n\r\x{2028}\x{2029}]{2,}\.[^\n\r\x{2028}\x{2029}]{2,}";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN).unwrap_or_else(|err| panic!("EMAIL_PATTERN must compile: {err}"))
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Only emptiness is checked; whitespace counts as content.
pub fn is_present_message(value: &str) -> bool {
    !value.is_empty()
}

/// Checks email, then message, and stops at the first failure.
pub fn validate(payload: &ContactPayload) -> Result<(), ValidationError> {
    if !is_valid_email(&payload.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_present_message(&payload.message) {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
