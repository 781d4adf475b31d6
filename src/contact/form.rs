use crate::{
    contact::{ContactConfig, WebhookPayload, WebhookTransport},
    foundation::error::{ChipflowError, ChipflowResult},
};

/// How long a settled form shows its outcome before returning to idle.
pub const SETTLED_REVERT_MS: u64 = 5000;

/// What the visitor typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub consent: bool,
}

impl ContactFields {
    /// Required fields present and an email with text on both sides of `@`.
    pub fn validate(&self) -> ChipflowResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChipflowError::validation("name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(ChipflowError::validation("email is required"));
        }
        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(ChipflowError::validation(format!(
                    "'{}' is not an email address",
                    self.email
                )));
            }
        }
        if self.message.trim().is_empty() {
            return Err(ChipflowError::validation("message is required"));
        }
        if !self.consent {
            return Err(ChipflowError::validation(
                "consent to be contacted is required",
            ));
        }
        Ok(())
    }

    /// Wire body. The company is always a string; an absent one is sent as `""`.
    pub fn to_payload(&self) -> WebhookPayload {
        WebhookPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone().unwrap_or_default(),
            message: self.message.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl FormState {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Submit lifecycle: idle, submitting, then success or error, then idle again after
/// [`SETTLED_REVERT_MS`]. There is no retry; the visitor submits again.
#[derive(Clone, Debug)]
pub struct ContactForm {
    cfg: ContactConfig,
    fields: ContactFields,
    state: FormState,
    settled_at_ms: Option<u64>,
}

impl ContactForm {
    pub fn new(cfg: ContactConfig) -> Self {
        Self {
            cfg,
            fields: ContactFields::default(),
            state: FormState::Idle,
            settled_at_ms: None,
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.cfg
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    /// Inputs and the submit button are disabled whenever the form is not idle, including
    /// while a settled outcome is shown.
    pub fn is_disabled(&self) -> bool {
        self.state != FormState::Idle
    }

    /// Validate and move to [`FormState::Submitting`], returning the body to send.
    ///
    /// Only an idle form can submit. Invalid fields leave the state untouched.
    pub fn begin_submit(&mut self) -> ChipflowResult<WebhookPayload> {
        if self.state != FormState::Idle {
            return Err(ChipflowError::contact(format!(
                "cannot submit while the form is {:?}",
                self.state
            )));
        }
        self.fields.validate()?;
        self.state = FormState::Submitting;
        Ok(self.fields.to_payload())
    }

    /// Settle an in-flight submission. 2xx clears the fields; anything else is an error.
    pub fn complete(&mut self, result: ChipflowResult<u16>, now_ms: u64) -> FormState {
        if self.state != FormState::Submitting {
            tracing::warn!(state = ?self.state, "completion without a submission in flight");
            return self.state;
        }

        self.state = match result {
            Ok(status) if (200..300).contains(&status) => {
                self.fields = ContactFields::default();
                tracing::info!(status, "contact form sent");
                FormState::Success
            }
            Ok(status) => {
                tracing::warn!(status, "webhook rejected contact form");
                FormState::Error
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact form failed");
                FormState::Error
            }
        };
        self.settled_at_ms = Some(now_ms);
        self.state
    }

    /// Run a whole submission through `transport`. `now_ms` is taken as the completion time.
    ///
    /// Errors only when the form refuses to start (busy or invalid); delivery failures end in
    /// [`FormState::Error`].
    pub fn submit(
        &mut self,
        transport: &dyn WebhookTransport,
        now_ms: u64,
    ) -> ChipflowResult<FormState> {
        let payload = self.begin_submit()?;
        let result = match self.cfg.webhook_url.as_deref() {
            Some(url) => transport.post_json(url, &payload),
            None => Err(ChipflowError::contact("webhook URL is not configured")),
        };
        Ok(self.complete(result, now_ms))
    }

    /// Return a settled form to idle once [`SETTLED_REVERT_MS`] have passed.
    pub fn tick(&mut self, now_ms: u64) -> FormState {
        if let Some(at) = self.settled_at_ms
            && self.state.is_settled()
            && now_ms.saturating_sub(at) >= SETTLED_REVERT_MS
        {
            self.state = FormState::Idle;
            self.settled_at_ms = None;
        }
        self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
