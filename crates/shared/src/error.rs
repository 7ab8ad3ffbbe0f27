use thiserror::Error;

use crate::domain::FieldName;

pub const FORM_SUBMISSION_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Email,
    Message,
    Form,
}

impl From<FieldName> for ErrorKey {
    fn from(value: FieldName) -> Self {
        match value {
            FieldName::Email => ErrorKey::Email,
            FieldName::Message => ErrorKey::Message,
        }
    }
}

/// Locally detected input problem. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a message.")]
    EmptyMessage,
}

impl ValidationError {
    pub fn field(self) -> FieldName {
        match self {
            ValidationError::InvalidEmail => FieldName::Email,
            ValidationError::EmptyMessage => FieldName::Message,
        }
    }
}

/// The submission attempt as a whole failed. The cause is never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to send message. Please try again.")]
pub struct SubmissionFailed;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{name}'")]
pub struct UnknownFieldError {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<ValidationError>,
    pub message: Option<ValidationError>,
    pub form: Option<SubmissionFailed>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.message.is_none() && self.form.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, err: ValidationError) {
        match err.field() {
            FieldName::Email => self.email = Some(err),
            FieldName::Message => self.message = Some(err),
        }
    }

    pub fn get(&self, key: ErrorKey) -> Option<String> {
        match key {
            ErrorKey::Email => self.email.map(|e| e.to_string()),
            ErrorKey::Message => self.message.map(|e| e.to_string()),
            ErrorKey::Form => self.form.map(|e| e.to_string()),
        }
    }

    /// Visible error lines in display order: email, message, form.
    pub fn messages(&self) -> Vec<String> {
        [ErrorKey::Email, ErrorKey::Message, ErrorKey::Form]
            .into_iter()
            .filter_map(|key| self.get(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_routes_error_to_its_field() {
        let mut errors = FormErrors::default();
        errors.record(ValidationError::EmptyMessage);

        assert!(errors.email.is_none());
        assert_eq!(errors.message, Some(ValidationError::EmptyMessage));
        assert_eq!(
            errors.get(ErrorKey::Message).as_deref(),
            Some("Please enter a message.")
        );
    }

    #[test]
    fn form_error_uses_fixed_text() {
        let errors = FormErrors {
            form: Some(SubmissionFailed),
            ..FormErrors::default()
        };
        assert_eq!(errors.messages(), vec![FORM_SUBMISSION_FAILED.to_string()]);
    }

    #[test]
    fn clear_empties_every_key() {
        let mut errors = FormErrors {
            email: Some(ValidationError::InvalidEmail),
            message: None,
            form: Some(SubmissionFailed),
        };
        errors.clear();
        assert!(errors.is_empty());
    }
}
