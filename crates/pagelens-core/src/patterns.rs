//! Currency patterns shared by the pricing, CTA and structure extractors

use once_cell::sync::Lazy;
use regex::Regex;

/// A currency symbol or ISO code followed by an amount, e.g. `$1,299.00`, `€ 49`, `USD 20`
pub const AMOUNT: &str = r"(?:[$€£¥₹]|\b(?:USD|EUR|GBP|CAD|AUD)\s?)\s?\d[\d,]*(?:\.\d{1,2})?";

pub static CURRENCY_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(AMOUNT).expect("invalid currency amount regex"));

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\d.]").expect("invalid non-numeric regex"));

pub fn contains_currency_amount(text: &str) -> bool {
    CURRENCY_AMOUNT.is_match(text)
}

/// Numeric value of a price string with symbols and thousands separators removed
pub fn parse_amount(text: &str) -> Option<f64> {
    let digits = NON_NUMERIC.replace_all(text, "");
    let digits = digits.trim_matches('.');
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}
