//! # pagelens-core
//!
//! Heuristic conversion-rate signals for product and landing pages.
//!
//! This library provides:
//! - HTML parsing with best-effort repair of malformed markup
//! - Site-type classification (ecommerce, SaaS, B2B, service, generic)
//! - Signal extractors for pricing, calls to action, imagery, testimonials,
//!   trust, technical SEO/accessibility and page structure
//! - Heuristic 0-10 conversion scores
//! - The prompt and client for an optional LLM report
//!
//! ## Features
//!
//! - `default`: parsing, extraction and scoring over an HTML string
//! - `http-client`: page fetching and the OpenAI report generator
//!
//! ## Example
//!
//! ```
//! use pagelens_core::{HeuristicConfig, analyze_html};
//!
//! let html = r#"<title>Widget</title><h1>Widget Pro</h1>
//!     <div class="price">$25.00</div><button>Buy Now</button>"#;
//!
//! let signals = analyze_html(html, &HeuristicConfig::default());
//! assert_eq!(signals.pricing.price, "$25.00");
//! assert_eq!(signals.cta.cta.as_deref(), Some("Buy Now"));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod parser;
pub mod patterns;
pub mod report;
pub mod scoring;
pub mod site_type;
pub mod types;

#[cfg(feature = "http-client")]
pub mod fetch;

pub use config::{FoldThreshold, HeuristicConfig};
pub use error::{PageError, Result};
pub use parser::{Page, validate_url};
pub use report::{NOT_CONFIGURED, ReportOutcome, build_prompt};
pub use scoring::ConversionScores;
pub use site_type::{KeywordProfile, SiteType, classify};
pub use types::PageSignals;

#[cfg(feature = "http-client")]
pub use fetch::Fetcher;

#[cfg(feature = "http-client")]
pub use report::{OpenAiReporter, ReportGenerator, generate_report};

/// Run every extractor over an HTML document.
///
/// Never fails: malformed markup is repaired by the parser and extractors
/// fall back to empty values for anything they cannot find.
pub fn analyze_html(html: &str, config: &HeuristicConfig) -> PageSignals {
    let page = Page::parse(html);
    analyze_page(&page, config)
}

/// Run every extractor over an already parsed page
pub fn analyze_page(page: &Page, config: &HeuristicConfig) -> PageSignals {
    let site_type = classify(page.text_lower());
    let profile = site_type.profile();
    let cta_keywords = profile.cta_keywords();

    let interactive = extract::cta::interactive_elements(page);
    let cta_match = extract::cta::locate(&interactive, &cta_keywords);

    let mut signals = PageSignals {
        site_type,
        basic: extract::basic::extract(page, profile),
        pricing: extract::pricing::extract(page, profile, config),
        cta: extract::cta::extract(
            cta_match.as_ref(),
            interactive.len(),
            config.fold_for(site_type),
            config.price_proximity_depth,
        ),
        imagery: extract::imagery::extract(page),
        testimonials: extract::testimonials::extract(page),
        trust: extract::trust::extract(page),
        technical: extract::technical::extract(page),
        structure: extract::structure::extract(page, cta_match.as_ref(), profile, &cta_keywords),
        conversion_scores: ConversionScores::default(),
    };
    signals.conversion_scores = scoring::score(&signals);
    signals
}

/// Fetch `url` and analyze the returned HTML.
///
/// Only invalid URLs and fetch failures produce an error.
#[cfg(feature = "http-client")]
pub async fn analyze_url(
    fetcher: &Fetcher,
    url: &str,
    config: &HeuristicConfig,
) -> Result<PageSignals> {
    let start = std::time::Instant::now();
    let html = fetcher.fetch(url).await?;
    let signals = analyze_html(&html, config);

    tracing::info!(
        url,
        site_type = %signals.site_type,
        html_bytes = signals.technical.html_bytes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "page analyzed"
    );

    Ok(signals)
}
