//! Presentation contract: what a renderer shows for each phase. Nothing in
//! the controller depends on it.

use std::fmt;

use crate::{FormSnapshot, SubmissionPhase};

pub const FORM_HEADING: &str = "Say hello";
pub const SUBMIT_LABEL: &str = "Send message";
pub const SUBMIT_LABEL_SENDING: &str = "Sending...";
pub const SENT_TITLE: &str = "Message Sent";
pub const SENT_BODY: &str = "I’ll get back to you within a couple days, sit tight";
pub const HOME_LINK_LABEL: &str = "Back to homepage";
pub const HOME_LINK_HREF: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactView {
    Editing {
        email: String,
        message: String,
        errors: Vec<String>,
        submit_label: &'static str,
        submit_enabled: bool,
    },
    Sent,
}

impl ContactView {
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        if snapshot.phase == SubmissionPhase::Succeeded {
            return ContactView::Sent;
        }

        let sending = snapshot.phase == SubmissionPhase::Sending;
        ContactView::Editing {
            email: snapshot.email.clone(),
            message: snapshot.message.clone(),
            errors: snapshot.errors.messages(),
            submit_label: if sending {
                SUBMIT_LABEL_SENDING
            } else {
                SUBMIT_LABEL
            },
            submit_enabled: !sending,
        }
    }
}

impl fmt::Display for ContactView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactView::Editing {
                email,
                message,
                errors,
                submit_label,
                submit_enabled,
            } => {
                writeln!(f, "{FORM_HEADING}")?;
                writeln!(f, "Your email: {email}")?;
                writeln!(f, "Message: {message}")?;
                for err in errors {
                    writeln!(f, "! {err}")?;
                }
                if *submit_enabled {
                    write!(f, "[{submit_label}]")
                } else {
                    write!(f, "[{submit_label}] (disabled)")
                }
            }
            ContactView::Sent => {
                writeln!(f, "{SENT_TITLE}")?;
                writeln!(f, "{SENT_BODY}")?;
                write!(f, "{HOME_LINK_LABEL} -> {HOME_LINK_HREF}")
            }
        }
    }
}
