//! Price detection: markup selectors first, then text patterns

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::HeuristicConfig;
use crate::parser::{Page, element_text};
use crate::patterns::{AMOUNT, parse_amount};
use crate::site_type::{KeywordProfile, keyword_hits};

/// Checked in order; the first element with usable text wins
const PRICE_SELECTORS: &[&str] = &[
    "[itemprop='price']",
    "[data-price]",
    ".price",
    "[class*='price']",
    "[id*='price']",
    ".amount",
];

static PER_UNIT_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i){AMOUNT}\s*(?:/\s*(?:mo|month|yr|year|user|seat|week|day|hr|hour)\b|per\s+(?:month|mo|year|yr|user|seat|week|day|hour)\b)"
    ))
    .expect("invalid per-unit suffix regex")
});

static BARE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(AMOUNT).expect("invalid bare amount regex"));

static PER_UNIT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:per\s+(?:month|year|user|seat)|monthly|yearly|annually)\s*[:\-]?\s*{AMOUNT}"
    ))
    .expect("invalid per-unit prefix regex")
});

static FREE_PRICING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:free\s+(?:plan|trial|forever|tier|version|to\s+use)|(?:it'?s|100%|completely|always)\s+free|no\s+cost|at\s+no\s+charge)\b",
    )
    .expect("invalid free pricing regex")
});

static CUSTOM_PRICING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:custom\s+pricing|contact\s+(?:us|sales)\s+for\s+(?:pricing|a\s+quote)|request\s+(?:a\s+)?(?:quote|pricing)|pricing\s+on\s+request|price\s+on\s+application)\b",
    )
    .expect("invalid custom pricing regex")
});

static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{AMOUNT}\s*(?:-|–|—|to)\s*(?:{AMOUNT}|\d[\d,]*(?:\.\d{{1,2}})?)"))
        .expect("invalid price range regex")
});

static SLASH_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*/\s*").expect("invalid slash spacing regex"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSignals {
    pub price: String,
    /// Distinct pricing vocabulary terms present on the page
    pub pricing_keyword_hits: usize,
}

/// How a text pattern's matches are screened
#[derive(Debug, Clone, Copy)]
enum Threshold {
    /// Per-unit amounts, compared to `min_unit_price`
    Unit,
    /// Single or ranged amounts, compared to `min_price`
    Full,
    /// Non-numeric phrasing, accepted as-is
    None,
}

/// Text patterns in priority order
static TEXT_PATTERNS: Lazy<Vec<(&'static str, &'static Lazy<Regex>, Threshold)>> =
    Lazy::new(|| {
        vec![
            ("per_unit_suffix", &PER_UNIT_SUFFIX, Threshold::Unit),
            ("bare_amount", &BARE_AMOUNT, Threshold::Full),
            ("per_unit_prefix", &PER_UNIT_PREFIX, Threshold::Unit),
            ("free", &FREE_PRICING, Threshold::None),
            ("custom", &CUSTOM_PRICING, Threshold::None),
            ("range", &PRICE_RANGE, Threshold::Full),
        ]
    });

pub fn extract(page: &Page, profile: &KeywordProfile, config: &HeuristicConfig) -> PricingSignals {
    let price = price_from_markup(page)
        .or_else(|| price_from_text(page.text(), config))
        .unwrap_or_default();

    PricingSignals {
        price,
        pricing_keyword_hits: keyword_hits(page.text_lower(), profile.pricing),
    }
}

/// First price-like element with non-empty text, or a machine-readable value attribute
pub fn price_from_markup(page: &Page) -> Option<String> {
    PRICE_SELECTORS.iter().find_map(|selector| {
        page.select_all(selector).iter().find_map(|element| {
            let text = element_text(element);
            if !text.is_empty() {
                return Some(text);
            }
            ["content", "data-price"]
                .iter()
                .filter_map(|attr| element.value().attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        })
    })
}

/// Scan visible text for the first acceptable price in pattern priority order
pub fn price_from_text(text: &str, config: &HeuristicConfig) -> Option<String> {
    TEXT_PATTERNS.iter().find_map(|(name, pattern, threshold)| {
        let found = pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| passes_threshold(candidate, *threshold, config))?;
        tracing::debug!(pattern = *name, price = found, "price matched page text");
        Some(normalize_spacing(found))
    })
}

fn passes_threshold(candidate: &str, threshold: Threshold, config: &HeuristicConfig) -> bool {
    let minimum = match threshold {
        Threshold::None => return true,
        Threshold::Unit => config.min_unit_price,
        Threshold::Full => config.min_price,
    };

    // Ranges and prefixed amounts are judged by their largest number
    BARE_AMOUNT
        .find_iter(candidate)
        .filter_map(|m| parse_amount(m.as_str()))
        .chain(trailing_number(candidate))
        .fold(None, |best: Option<f64>, value| Some(best.map_or(value, |b| b.max(value))))
        .is_some_and(|value| value >= minimum)
}

/// Upper bound of a range written without a second currency symbol ("$10 - 20")
fn trailing_number(candidate: &str) -> Option<f64> {
    let tail = candidate.rsplit(|c: char| c.is_whitespace() || c == '-').next()?;
    if tail.chars().next()?.is_ascii_digit() {
        parse_amount(tail)
    } else {
        None
    }
}

fn normalize_spacing(price: &str) -> String {
    let collapsed = WHITESPACE.replace_all(price.trim(), " ");
    SLASH_SPACING.replace_all(&collapsed, "/").into_owned()
}
