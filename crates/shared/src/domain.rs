use std::{fmt, str::FromStr};

use crate::error::UnknownFieldError;

pub const MAX_EMAIL_LENGTH: usize = 512;
pub const MAX_MESSAGE_LENGTH: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Email,
    Message,
}

impl FieldName {
    pub const ALL: [FieldName; 2] = [FieldName::Email, FieldName::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Email => "email",
            FieldName::Message => "message",
        }
    }

    /// Entry-time limit for the input control; counted in chars (Unicode
    /// scalar values). A browser `maxLength` counts UTF-16 units, so text
    /// with astral chars is cut later here than it would be there.
    pub fn max_len(self) -> usize {
        match self {
            FieldName::Email => MAX_EMAIL_LENGTH,
            FieldName::Message => MAX_MESSAGE_LENGTH,
        }
    }

    /// Cuts `value` down to [`FieldName::max_len`] chars, the way a bounded
    /// input control would refuse further keystrokes.
    pub fn clamp(self, value: &str) -> String {
        match value.char_indices().nth(self.max_len()) {
            Some((cut, _)) => value[..cut].to_string(),
            None => value.to_string(),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(FieldName::Email),
            "message" => Ok(FieldName::Message),
            other => Err(UnknownFieldError {
                name: other.to_string(),
            }),
        }
    }
}

/// Field values captured at the moment a submission is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPayload {
    pub email: String,
    pub message: String,
}

impl ContactPayload {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Email => &self.email,
            FieldName::Message => &self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_field_names() {
        assert_eq!("email".parse::<FieldName>().unwrap(), FieldName::Email);
        assert_eq!("message".parse::<FieldName>().unwrap(), FieldName::Message);
    }

    #[test]
    fn rejects_unknown_field_name() {
        let err = "form".parse::<FieldName>().unwrap_err();
        assert_eq!(err.name, "form");
        assert_eq!(err.to_string(), "unknown form field 'form'");
    }

    #[test]
    fn clamp_cuts_on_char_boundary() {
        let long = "é".repeat(MAX_EMAIL_LENGTH + 10);
        let clamped = FieldName::Email.clamp(&long);
        assert_eq!(clamped.chars().count(), MAX_EMAIL_LENGTH);

        assert_eq!(FieldName::Message.clamp("short"), "short");
    }

    #[test]
    fn clamp_counts_astral_chars_once() {
        let emoji = "😀".repeat(MAX_EMAIL_LENGTH);
        assert_eq!(FieldName::Email.clamp(&emoji), emoji);
    }

    #[test]
    fn payload_get_reads_each_field() {
        let payload = ContactPayload::new("ab@cd.ef", "hello");
        assert_eq!(payload.get(FieldName::Email), "ab@cd.ef");
        assert_eq!(payload.get(FieldName::Message), "hello");
    }
}
