use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub base_url: String,
    pub port: u16,

    // EmailJS
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
    pub emailjs_api_url: String,

    // UI timings
    pub popup_delay_ms: u64,
    pub success_reset_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Site
            base_url: std::env::var("SITE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://al-andalus-pestcontrol.com".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // EmailJS - the public key is the browser-side key, not a secret
            emailjs_service_id: std::env::var("EMAILJS_SERVICE_ID")
                .context("EMAILJS_SERVICE_ID not set")?,
            emailjs_template_id: std::env::var("EMAILJS_TEMPLATE_ID")
                .context("EMAILJS_TEMPLATE_ID not set")?,
            emailjs_public_key: std::env::var("EMAILJS_PUBLIC_KEY")
                .context("EMAILJS_PUBLIC_KEY not set")?,
            emailjs_api_url: std::env::var("EMAILJS_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.emailjs.com".to_string()),

            // UI timings
            popup_delay_ms: std::env::var("POPUP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            success_reset_secs: std::env::var("SUCCESS_RESET_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }

    /// Delay between mounting the welcome popup and showing it
    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }

    /// How long a success message stays up before the form returns to idle
    pub fn success_reset(&self) -> Duration {
        Duration::from_secs(self.success_reset_secs)
    }
}
