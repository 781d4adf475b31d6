//! The contact form: field validation, the submit state machine and the webhook call.

mod form;
mod webhook;

pub use form::{ContactFields, ContactForm, FormState, SETTLED_REVERT_MS};
pub use webhook::{
    ContactConfig, ReqwestTransport, WEBHOOK_URL_ENV, WebhookPayload, WebhookTransport,
};
