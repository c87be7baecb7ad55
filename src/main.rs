use al_andalus_site::{config, i18n::TranslationValidator, server};
use anyhow::Result;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("al_andalus_site=info".parse()?),
        )
        .init();

    info!("Starting Al Andalus site");

    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Report drift between the English and Arabic tables at startup
    let report = TranslationValidator::validate_registry();
    for error in &report.errors {
        warn!("Translation error: {}", error);
    }
    for warning in &report.warnings {
        warn!("Translation warning: {}", warning);
    }

    server::serve(config).await
}
