//! Contact form: field state, validation, delivery through EmailJS.
//!
//! - `form`: the four fields, validation, template mapping
//! - `email`: the `EmailSender` seam and the EmailJS client
//! - `controller`: per-form submission state (in-flight guard, status expiry)

mod controller;
mod email;
mod form;

pub use controller::{ContactFormController, SubmitError};
pub use email::{EmailError, EmailJsClient, EmailSender};
pub use form::{is_valid_email, ContactForm, FormField, TemplateParams, ValidationError};

use crate::i18n::Language;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome shown under the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Success(message) | SubmissionStatus::Error(message) => {
                Some(message)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionStatus::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SubmissionStatus::Error(_))
    }
}

/// Send one already-validated form and turn the result into a status.
///
/// Makes exactly one outbound call; failures are reported, never retried.
pub async fn deliver<S: EmailSender>(
    sender: &S,
    form: &ContactForm,
    language: Language,
) -> SubmissionStatus {
    match sender.send(&form.to_template_params()).await {
        Ok(()) => {
            info!("Contact message delivered");
            SubmissionStatus::Success(language.t("contact.form.success").to_string())
        }
        Err(e) => {
            warn!("Contact message delivery failed: {}", e);
            let detail = e
                .diagnostic()
                .unwrap_or_else(|| language.t("contact.form.error_fallback").to_string());
            SubmissionStatus::Error(format!("{} {}", language.t("contact.form.error"), detail))
        }
    }
}
