use crate::config::Config;
use crate::contact::TemplateParams;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum EmailError {
    /// The service answered with a non-success status.
    #[error("email service error ({status}): {text}")]
    Rejected { status: u16, text: String },

    /// The request never got a response.
    #[error("failed to reach email service: {0}")]
    Transport(#[from] reqwest::Error),
}

impl EmailError {
    /// Best-effort diagnostic to show the visitor: the service's own text,
    /// else the transport message. `None` when neither says anything.
    pub fn diagnostic(&self) -> Option<String> {
        let text = match self {
            EmailError::Rejected { text, .. } => text.trim().to_string(),
            EmailError::Transport(e) => e.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            EmailError::Rejected { status, .. } => Some(*status),
            EmailError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Delivers a filled-in contact form.
pub trait EmailSender: Send + Sync {
    fn send(&self, params: &TemplateParams) -> impl Future<Output = Result<(), EmailError>> + Send;
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Client for the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    api_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsClient {
    pub fn new(
        api_url: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.emailjs_api_url.clone(),
            config.emailjs_service_id.clone(),
            config.emailjs_template_id.clone(),
            config.emailjs_public_key.clone(),
        )
    }
}

impl EmailSender for EmailJsClient {
    async fn send(&self, params: &TemplateParams) -> Result<(), EmailError> {
        let url = format!("{}/api/v1.0/email/send", self.api_url);

        let request = SendEmailRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            error!("EmailJS error ({}): {}", status, text);
            return Err(EmailError::Rejected { status, text });
        }

        debug!("EmailJS accepted message from {}", params.from_email);
        Ok(())
    }
}
