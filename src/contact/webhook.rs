use std::time::Duration;

use crate::foundation::error::{ChipflowError, ChipflowResult};

/// Environment variable holding the webhook endpoint.
pub const WEBHOOK_URL_ENV: &str = "CHIPFLOW_WEBHOOK_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Where contact submissions are posted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactConfig {
    pub webhook_url: Option<String>,
}

impl ContactConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::default().with_url(Some(webhook_url.into()))
    }

    /// Read the endpoint from [`WEBHOOK_URL_ENV`]. Unset or blank means not configured.
    pub fn from_env() -> Self {
        Self::default().with_url(std::env::var(WEBHOOK_URL_ENV).ok())
    }

    /// Replace the endpoint; blank strings count as none.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.webhook_url = url
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty());
        self
    }
}

/// JSON body posted to the webhook. Keys are the ones the receiving workflow expects.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "mensagem")]
    pub message: String,
}

/// Sends one payload and reports the HTTP status.
pub trait WebhookTransport {
    fn post_json(&self, url: &str, payload: &WebhookPayload) -> ChipflowResult<u16>;
}

/// Blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> ChipflowResult<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> ChipflowResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChipflowError::contact(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl WebhookTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, payload))]
    fn post_json(&self, url: &str, payload: &WebhookPayload) -> ChipflowResult<u16> {
        let res = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .map_err(|e| ChipflowError::contact(format!("failed to reach webhook: {e}")))?;
        let status = res.status().as_u16();
        tracing::debug!(status, "webhook responded");
        Ok(status)
    }
}
