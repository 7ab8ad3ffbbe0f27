use anyhow::{anyhow, Result};
use async_trait::async_trait;
use relay_integration::{EmailRelay, RelayConfig, RelayCredentials, TemplateParams};
use shared::{
    domain::{ContactPayload, FieldName},
    error::{FormErrors, SubmissionFailed, UnknownFieldError, ValidationError},
};
use tracing::{debug, error, info, warn};

pub mod emailjs;
pub mod session;
pub mod validation;
pub mod view;

pub use emailjs::EmailJsClient;
pub use view::ContactView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
}

/// What the controller hands to the gateway. Only the outcome matters.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn send(&self, payload: &ContactPayload) -> Result<()>;
}

/// Adapts an [`EmailRelay`] to the controller, carrying the deployment's
/// relay identifiers.
pub struct RelayGateway<R: EmailRelay> {
    relay: R,
    credentials: RelayCredentials,
}

impl<R: EmailRelay> RelayGateway<R> {
    pub fn new(relay: R, credentials: RelayCredentials) -> Self {
        Self { relay, credentials }
    }
}

impl RelayGateway<EmailJsClient> {
    pub fn emailjs(config: RelayConfig) -> Self {
        Self::new(EmailJsClient::new(config.endpoint), config.credentials)
    }
}

#[async_trait]
impl<R: EmailRelay> SubmissionGateway for RelayGateway<R> {
    async fn send(&self, payload: &ContactPayload) -> Result<()> {
        let params = TemplateParams::from(payload);
        self.relay
            .send_form(&self.credentials, &params)
            .await
            .map_err(|err| anyhow!(err).context("email relay send failed"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation passed; the caller must deliver this payload to the gateway
    /// and report back through [`ContactFormController::complete_submit`].
    Dispatch(ContactPayload),
    Rejected(ValidationError),
    AlreadySending,
    AlreadySent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Rejected(ValidationError),
    Failed,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub email: String,
    pub message: String,
    pub errors: FormErrors,
    pub phase: SubmissionPhase,
}

#[derive(Debug, Default)]
pub struct ContactFormController {
    email: String,
    message: String,
    errors: FormErrors,
    phase: SubmissionPhase,
}

impl ContactFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        if self.phase == SubmissionPhase::Succeeded {
            debug!(field = %field, "contact form: edit ignored after message was sent");
            return;
        }
        let value = value.into();
        match field {
            FieldName::Email => self.email = value,
            FieldName::Message => self.message = value,
        }
    }

    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> std::result::Result<(), UnknownFieldError> {
        let field = name.parse::<FieldName>()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn field(&self, field: FieldName) -> &str {
        match field {
            FieldName::Email => &self.email,
            FieldName::Message => &self.message,
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_sending(&self) -> bool {
        self.phase == SubmissionPhase::Sending
    }

    pub fn has_succeeded(&self) -> bool {
        self.phase == SubmissionPhase::Succeeded
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            email: self.email.clone(),
            message: self.message.clone(),
            errors: self.errors.clone(),
            phase: self.phase,
        }
    }

    pub fn view(&self) -> ContactView {
        ContactView::from_snapshot(&self.snapshot())
    }

    /// Runs the synchronous half of a submission. Only a
    /// [`SubmitStart::Dispatch`] leaves the controller in `Sending`.
    pub fn begin_submit(&mut self) -> SubmitStart {
        match self.phase {
            SubmissionPhase::Sending => {
                warn!("contact form: submit ignored while a send is in flight");
                return SubmitStart::AlreadySending;
            }
            SubmissionPhase::Succeeded => {
                warn!("contact form: submit ignored after message was sent");
                return SubmitStart::AlreadySent;
            }
            SubmissionPhase::Idle => {}
        }

        self.phase = SubmissionPhase::Sending;
        self.errors.clear();

        let payload = ContactPayload::new(self.email.clone(), self.message.clone());
        if let Err(err) = validation::validate(&payload) {
            debug!(field = %err.field(), "contact form: validation failed");
            self.errors.record(err);
            self.phase = SubmissionPhase::Idle;
            return SubmitStart::Rejected(err);
        }

        info!("contact form: dispatching message to relay");
        SubmitStart::Dispatch(payload)
    }

    /// Applies the gateway outcome of the dispatched submission.
    pub fn complete_submit(&mut self, outcome: Result<()>) -> SubmitOutcome {
        if self.phase != SubmissionPhase::Sending {
            warn!(phase = ?self.phase, "contact form: completion ignored, no send in flight");
            return SubmitOutcome::Ignored;
        }

        match outcome {
            Ok(()) => {
                info!("contact form: message sent");
                self.phase = SubmissionPhase::Succeeded;
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("contact form: send failed: {err:#}");
                self.errors.form = Some(SubmissionFailed);
                self.phase = SubmissionPhase::Idle;
                SubmitOutcome::Failed
            }
        }
    }

    /// Validates, calls `gateway` once if the input is acceptable, and maps
    /// the outcome onto the form.
    pub async fn submit<G>(&mut self, gateway: &G) -> SubmitOutcome
    where
        G: SubmissionGateway + ?Sized,
    {
        match self.begin_submit() {
            SubmitStart::Dispatch(payload) => {
                let outcome = gateway.send(&payload).await;
                self.complete_submit(outcome)
            }
            SubmitStart::Rejected(err) => SubmitOutcome::Rejected(err),
            SubmitStart::AlreadySending | SubmitStart::AlreadySent => SubmitOutcome::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
