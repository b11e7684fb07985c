//! HTTP endpoint for pagelens
//!
//! - `POST /api/analyze` with `{"url": "..."}` (JSON) or `url=...` (form)
//! - `GET /health`
//! - `GET /` serves a minimal form for trying the analyzer in a browser

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use pagelens_core::{
    Fetcher, HeuristicConfig, OpenAiReporter, PageError, PageSignals, ReportGenerator,
    analyze_url, generate_report,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub mod config;

pub use config::Config;

const FRONTEND_HTML: &str = include_str!("frontend.html");

/// Read-only state shared by every request
pub struct AppState {
    pub fetcher: Fetcher,
    pub heuristics: HeuristicConfig,
    pub reporter: Option<Arc<dyn ReportGenerator>>,
}

impl AppState {
    pub fn new(fetcher: Fetcher, heuristics: HeuristicConfig) -> Self {
        Self {
            fetcher,
            heuristics,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ReportGenerator>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut state = Self::new(Fetcher::new()?, config.heuristics.clone());

        if let Some(api_key) = &config.openai_api_key {
            let mut reporter = OpenAiReporter::new(api_key.clone())?;
            if let Some(model) = &config.openai_model {
                reporter = reporter.with_model(model.clone());
            }
            if let Some(base_url) = &config.openai_base_url {
                reporter = reporter.with_base_url(base_url.clone());
            }
            info!(model = reporter.model(), "LLM report enabled");
            state = state.with_reporter(Arc::new(reporter));
        } else {
            info!("OPENAI_API_KEY not set, LLM report disabled");
        }

        Ok(state)
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub url: String,
    pub heuristics: PageSignals,
    pub llm_report: String,
}

/// Client-facing error: a status and `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for AnalyzeRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let axum::Form(body) = axum::Form::<AnalyzeRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(body)
        } else {
            let Json(body) = Json::<AnalyzeRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(body)
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(FRONTEND_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    request: AnalyzeRequest,
) -> std::result::Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let url = request.url.trim().to_string();
    let span = info_span!("analyze", %request_id, url = %url);

    run_analysis(&state, url).instrument(span).await.map(Json)
}

async fn run_analysis(
    state: &AppState,
    url: String,
) -> std::result::Result<AnalyzeResponse, ApiError> {
    let heuristics = analyze_url(&state.fetcher, &url, &state.heuristics).await?;
    let outcome = generate_report(state.reporter.as_deref(), &heuristics).await;
    info!(report = outcome.is_generated(), "analysis complete");

    Ok(AnalyzeResponse {
        url,
        heuristics,
        llm_report: outcome.into_text(),
    })
}
