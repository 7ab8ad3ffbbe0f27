use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use shared::domain::{ContactPayload, FieldName};
use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com";

/// The three opaque identifiers the relay needs for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub credentials: RelayCredentials,
    pub endpoint: Url,
}

#[derive(Debug, Error)]
pub enum RelayConfigError {
    #[error("relay setting '{0}' must not be empty")]
    MissingValue(&'static str),
    #[error("invalid relay endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
}

impl RelayConfig {
    pub fn new(
        service_id: &str,
        template_id: &str,
        public_key: &str,
        endpoint: &str,
    ) -> Result<Self, RelayConfigError> {
        let service_id = required("service_id", service_id)?;
        let template_id = required("template_id", template_id)?;
        let public_key = required("public_key", public_key)?;
        let endpoint_raw = required("endpoint", endpoint)?;
        let endpoint =
            Url::parse(&endpoint_raw).map_err(|source| RelayConfigError::InvalidEndpoint {
                value: endpoint_raw.clone(),
                source,
            })?;

        Ok(Self {
            credentials: RelayCredentials {
                service_id,
                template_id,
                public_key,
            },
            endpoint,
        })
    }
}

fn required(name: &'static str, value: &str) -> Result<String, RelayConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RelayConfigError::MissingValue(name));
    }
    Ok(value.to_string())
}

/// Named values rendered into the relay's message template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(pub BTreeMap<String, String>);

impl From<&ContactPayload> for TemplateParams {
    fn from(payload: &ContactPayload) -> Self {
        Self(
            FieldName::ALL
                .into_iter()
                .map(|field| (field.as_str().to_string(), payload.get(field).to_string()))
                .collect(),
        )
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay transport failure: {0}")]
    Transport(String),
    #[error("relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send_form(
        &self,
        credentials: &RelayCredentials,
        params: &TemplateParams,
    ) -> Result<(), RelayError>;
}

/// Accepts every message without transmitting it.
pub struct DryRunRelay;

#[async_trait]
impl EmailRelay for DryRunRelay {
    async fn send_form(
        &self,
        credentials: &RelayCredentials,
        params: &TemplateParams,
    ) -> Result<(), RelayError> {
        info!(
            service_id = %credentials.service_id,
            template_id = %credentials.template_id,
            fields = params.0.len(),
            "relay: dry run, message not transmitted"
        );
        Ok(())
    }
}
