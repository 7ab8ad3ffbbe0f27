//! EmailJS REST client behind the [`EmailRelay`] seam.

use async_trait::async_trait;
use relay_integration::{EmailRelay, RelayCredentials, RelayError, TemplateParams};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

const SEND_PATH: &str = "api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

pub struct EmailJsClient {
    http: Client,
    endpoint: Url,
}

impl EmailJsClient {
    /// `endpoint` is the relay origin, e.g. `https://api.emailjs.com`.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn send_url(&self) -> Result<Url, RelayError> {
        self.endpoint
            .join(SEND_PATH)
            .map_err(|err| RelayError::Transport(format!("invalid relay endpoint: {err}")))
    }
}

#[async_trait]
impl EmailRelay for EmailJsClient {
    async fn send_form(
        &self,
        credentials: &RelayCredentials,
        params: &TemplateParams,
    ) -> Result<(), RelayError> {
        let url = self.send_url()?;
        let res = self
            .http
            .post(url)
            .json(&SendEmailRequest {
                service_id: &credentials.service_id,
                template_id: &credentials.template_id,
                user_id: &credentials.public_key,
                template_params: params,
            })
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        let status = res.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "emailjs: message accepted");
            return Ok(());
        }

        let body = res
            .text()
            .await
            .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
        Err(RelayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "tests/emailjs_tests.rs"]
mod tests;
