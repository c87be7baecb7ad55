use crate::config::Config;
use crate::contact::{deliver, ContactForm, EmailJsClient};
use crate::i18n::Language;
use crate::page;
use crate::seo;
use crate::structured_data::{BusinessProfile, StructuredDataPublisher};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<EmailJsClient>,
    pub publisher: Arc<StructuredDataPublisher>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mailer = EmailJsClient::from_config(&config);
        let publisher = StructuredDataPublisher::new(BusinessProfile::with_base_url(
            config.base_url.clone(),
        ));
        Self {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
            publisher: Arc::new(publisher),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    lang: Option<String>,
}

impl LanguageQuery {
    /// Missing `lang` means the canonical language; an unknown one is an error.
    fn resolve(&self) -> Result<Language, ApiError> {
        match self.lang.as_deref() {
            None | Some("") => Ok(Language::canonical()),
            Some(code) => {
                Language::from_code(code).map_err(|_| ApiError::UnknownLanguage(code.to_string()))
            }
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    UnknownLanguage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnknownLanguage(code) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("unsupported language '{}'", code) })),
            )
                .into_response(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
        .route("/api/structured-data", get(structured_data))
        .route("/api/contact", post(contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(AppState::new(config)))
        .await
        .context("Server error")?;

    Ok(())
}

async fn health() -> &'static str {
    "healthy"
}

async fn home(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Html<String>, ApiError> {
    let language = query.resolve()?;
    Ok(Html(page::render_shell(&state.publisher, language)))
}

async fn robots(State(state): State<AppState>) -> String {
    seo::robots_txt(&state.config.base_url)
}

async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        seo::sitemap_xml(&state.config.base_url, Utc::now()),
    )
}

async fn structured_data(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let language = query.resolve()?;
    let documents: Vec<Value> = state
        .publisher
        .profile()
        .build_documents(language)
        .into_iter()
        .map(|doc| doc.payload)
        .collect();
    Ok(Json(documents))
}

async fn contact(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    Json(form): Json<ContactForm>,
) -> Result<Response, ApiError> {
    let language = query.resolve()?;

    if let Err(e) = form.validate() {
        warn!("Rejected contact form: {}", e);
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": "error",
                "field": e.field(),
                "message": e.localized(language),
            })),
        )
            .into_response());
    }

    let status = deliver(state.mailer.as_ref(), &form, language).await;
    let code = if status.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((code, Json(status)).into_response())
}
