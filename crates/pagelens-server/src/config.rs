use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use pagelens_core::HeuristicConfig;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Gates the LLM report; without it every response carries the placeholder
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub heuristics: HeuristicConfig,
}

impl Config {
    /// Load configuration from the environment, reading `.env` when present
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut heuristics = HeuristicConfig::default();
        if let Some(value) = var("PAGELENS_MIN_PRICE") {
            heuristics.min_price = value
                .trim()
                .parse()
                .context("PAGELENS_MIN_PRICE must be a number")?;
        }
        if let Some(value) = var("PAGELENS_MIN_UNIT_PRICE") {
            heuristics.min_unit_price = value
                .trim()
                .parse()
                .context("PAGELENS_MIN_UNIT_PRICE must be a number")?;
        }

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .trim()
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL"),
            openai_base_url: var("OPENAI_BASE_URL"),
            heuristics,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
