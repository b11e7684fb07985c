//! LLM report boundary
//!
//! The signals are embedded as compact JSON into a fixed CRO prompt. Whatever
//! the model returns is passed through untouched; pagelens never parses it.

use serde::{Deserialize, Serialize};

use crate::error::{PageError, Result};
use crate::types::PageSignals;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Placeholder returned in place of a report when no API key is set
pub const NOT_CONFIGURED: &str = "LLM not configured";

const PROMPT_HEADER: &str = "You are a senior CRO/UX specialist. Analyze the PRODUCT PAGE SIGNALS below and return STRICT JSON only.

PRODUCT PAGE SIGNALS:
";

const PROMPT_BODY: &str = r#"

SCORING CATEGORIES (0-10):
- clarity (value prop, product info clarity)
- cta (visibility, above-the-fold, price proximity)
- trust (reviews, guarantees, badges, reassurance near CTA)
- imagery (image count/quality proxy, alt coverage)
- findability (breadcrumbs, related items, on-site search)
- mobile (viewport, basic mobile readiness)
- performance (very rough proxies: html_bytes, script counts)
- accessibility (unlabeled buttons/links, alt coverage proxy)
- friction (popups/forms, otherwise infer from signals)
- seo (title/description ranges, OG, canonical)

RETURN JSON WITH EXACT KEYS:
{
  "summary": "1-2 sentence diagnosis focused on conversion risks and quick upside.",
  "category_scores": {
    "clarity": 0, "cta": 0, "trust": 0, "imagery": 0, "findability": 0,
    "mobile": 0, "performance": 0, "accessibility": 0, "friction": 0, "seo": 0
  },
  "top_issues": ["short, specific issue", "..."],
  "quick_wins": ["short fix likely high impact/low effort", "..."],
  "prioritized_actions": [
    {"action":"Move price next to CTA","why":"price_near_cta=false","impact":3,"confidence":2,"effort":1}
  ],
  "copy_suggestions": [
    {"area":"hero","text":"Free 30-day returns, ships in 24h"}
  ]
}

CONSTRAINTS:
- top_issues and quick_wins: 3-6 items each. prioritized_actions: 3-8 items. copy_suggestions is optional.
- Be concrete and map advice to the provided signals (e.g. if price_near_cta=false, address it).
- Use 1-3 sentence fragments per item; no fluff.
- Effort/Impact/Confidence must be integers in 1..3.
- Output ONLY valid JSON (no markdown, no prose).
"#;

/// Build the report prompt with the signals serialized as compact JSON
pub fn build_prompt(signals: &PageSignals) -> Result<String> {
    let json = signals
        .to_compact_json()
        .map_err(|e| PageError::ExternalService(format!("failed to serialize signals: {e}")))?;

    let mut prompt = String::with_capacity(PROMPT_HEADER.len() + json.len() + PROMPT_BODY.len());
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(&json);
    prompt.push_str(PROMPT_BODY);
    Ok(prompt)
}

/// Result of asking for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Raw model output
    Generated(String),
    /// The service was called and failed
    Failed(String),
    /// No credential configured, nothing was attempted
    NotConfigured,
}

impl ReportOutcome {
    /// The `llm_report` string exposed by the API and CLI
    pub fn into_text(self) -> String {
        match self {
            ReportOutcome::Generated(text) => text,
            ReportOutcome::Failed(reason) => format!("LLM unavailable: {reason}"),
            ReportOutcome::NotConfigured => NOT_CONFIGURED.to_string(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ReportOutcome::Generated(_))
    }
}

#[cfg(feature = "http-client")]
pub use client::{OpenAiReporter, ReportGenerator, generate_report};

#[cfg(feature = "http-client")]
mod client {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use reqwest::Client;
    use serde::Deserialize;
    use serde_json::json;
    use tracing::{debug, warn};

    use super::{DEFAULT_BASE_URL, DEFAULT_MODEL, ReportOutcome, build_prompt};
    use crate::error::{PageError, Result};
    use crate::types::PageSignals;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Something that can turn signals into a report
    #[async_trait]
    pub trait ReportGenerator: Send + Sync {
        async fn generate(&self, signals: &PageSignals) -> Result<String>;
    }

    /// Ask `generator` for a report, folding every outcome into a [`ReportOutcome`]
    pub async fn generate_report(
        generator: Option<&dyn ReportGenerator>,
        signals: &PageSignals,
    ) -> ReportOutcome {
        let Some(generator) = generator else {
            return ReportOutcome::NotConfigured;
        };

        match generator.generate(signals).await {
            Ok(text) => ReportOutcome::Generated(text),
            Err(e) => {
                warn!(error = %e, "report generation failed");
                ReportOutcome::Failed(e.to_string())
            }
        }
    }

    /// Chat-completions client for OpenAI-compatible APIs
    #[derive(Clone)]
    pub struct OpenAiReporter {
        http_client: Client,
        api_key: String,
        model: String,
        base_url: String,
    }

    #[derive(Deserialize)]
    struct ChatResponse {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: ChoiceMessage,
    }

    #[derive(Deserialize)]
    struct ChoiceMessage {
        content: Option<String>,
    }

    impl OpenAiReporter {
        pub fn new(api_key: impl Into<String>) -> Result<Self> {
            let http_client = Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| PageError::ExternalService(e.to_string()))?;

            Ok(Self {
                http_client,
                api_key: api_key.into(),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            })
        }

        pub fn with_model(mut self, model: impl Into<String>) -> Self {
            self.model = model.into();
            self
        }

        /// Point at a proxy or another OpenAI-compatible endpoint
        pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
            self.base_url = url.into().trim_end_matches('/').to_string();
            self
        }

        pub fn model(&self) -> &str {
            &self.model
        }
    }

    #[async_trait]
    impl ReportGenerator for OpenAiReporter {
        async fn generate(&self, signals: &PageSignals) -> Result<String> {
            let start = Instant::now();
            let prompt = build_prompt(signals)?;
            let body = json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
                "response_format": {"type": "json_object"},
            });

            let response = self
                .http_client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "OpenAI request failed");
                    PageError::ExternalService(e.to_string())
                })?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                warn!(status = %status, error = %error_text, "OpenAI API error");
                return Err(PageError::ExternalService(format!("OpenAI API returned {status}")));
            }

            let chat: ChatResponse = response
                .json()
                .await
                .map_err(|e| PageError::ExternalService(format!("unexpected response: {e}")))?;

            let content = chat
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| PageError::ExternalService("no response content".into()))?;

            debug!(
                model = %self.model,
                duration_ms = start.elapsed().as_millis() as u64,
                "report generated"
            );

            Ok(content)
        }
    }
}
