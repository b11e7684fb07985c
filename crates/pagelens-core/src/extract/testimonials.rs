//! Testimonial, review and rating detection

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PageError, Result};
use crate::parser::{Page, class_and_id};

const CONTAINER_SELECTOR: &str =
    "[class*='testimonial'], [class*='review'], [class*='customer'], [id*='testimonial'], [id*='review']";

const ITEM_CLASSES: &[&str] = &["testimonial", "review", "quote", "feedback", "rating"];

static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["“][^"“”]{20,}["”]"#).expect("invalid quoted text regex")
});

static BASED_ON_REVIEWS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)based\s+on\s+([\d,]+)\s+(?:reviews?|ratings?)")
        .expect("invalid review total regex")
});

static RATING_INDICATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d(?:\.\d)?\s*out\s+of\s+5\b|\b\d(?:\.\d)?\s+stars?\b")
        .expect("invalid rating indicator regex")
});

static ROLE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:CEO|CTO|CFO|COO|CMO|VP|Founder|Co-[Ff]ounder|Director|Manager|President|Owner|Head of)\b",
    )
    .expect("invalid role title regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b",
    )
    .expect("invalid date regex")
});

static SOCIAL_PROOF_TOTAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:trusted\s+by|used\s+by|loved\s+by|join)\s+(?:over\s+|more\s+than\s+)?(\d[\d,]*)(\s*k\b)?",
    )
    .expect("invalid social proof regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialSignals {
    pub testimonials: usize,
    /// Name of the strategy that produced `testimonials`
    pub testimonial_source: Option<String>,
    pub has_reviews_or_ratings: bool,
    pub average_rating: Option<f64>,
}

type TestimonialStrategy = fn(&Page) -> usize;

/// Evaluated in order, first nonzero count wins
const TESTIMONIAL_STRATEGIES: &[(&str, TestimonialStrategy)] = &[
    ("nested_items", nested_items),
    ("quoted_text", quoted_text),
    ("rating_indicators", rating_indicators),
    ("attributed_roles", attributed_roles),
    ("dated_entries", dated_entries),
    ("social_proof_totals", social_proof_totals),
];

pub fn extract(page: &Page) -> TestimonialSignals {
    let (testimonials, testimonial_source) = count_testimonials(page)
        .map(|(name, count)| (count, Some(name.to_string())))
        .unwrap_or((0, None));

    let text = page.text_lower();
    let has_reviews_or_ratings = testimonials > 0
        || text.contains('★')
        || text.contains("rating")
        || text.contains("reviews");

    TestimonialSignals {
        testimonials,
        testimonial_source,
        has_reviews_or_ratings,
        average_rating: average_rating(page),
    }
}

/// First strategy with a nonzero count, with its name
pub fn count_testimonials(page: &Page) -> Option<(&'static str, usize)> {
    TESTIMONIAL_STRATEGIES.iter().find_map(|(name, strategy)| {
        let count = strategy(page);
        if count == 0 {
            return None;
        }
        tracing::debug!(strategy = *name, count, "testimonials detected");
        Some((*name, count))
    })
}

fn nested_items(page: &Page) -> usize {
    let mut seen = HashSet::new();
    for container in page.select_all(CONTAINER_SELECTOR) {
        for element in container.descendants().skip(1).filter_map(scraper::ElementRef::wrap) {
            let names = class_and_id(&element);
            if ITEM_CLASSES.iter().any(|class| names.contains(class)) {
                seen.insert(element.id());
            }
        }
    }
    seen.len()
}

fn count_text_nodes(page: &Page, pattern: &Regex) -> usize {
    page.text_nodes()
        .into_iter()
        .filter(|node| pattern.is_match(node))
        .count()
}

fn quoted_text(page: &Page) -> usize {
    count_text_nodes(page, &QUOTED)
}

fn rating_indicators(page: &Page) -> usize {
    let text = page.text();
    let total = BASED_ON_REVIEWS
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<usize>().ok());

    total.unwrap_or_else(|| RATING_INDICATOR.find_iter(text).count())
}

fn attributed_roles(page: &Page) -> usize {
    count_text_nodes(page, &ROLE_TITLE)
}

fn dated_entries(page: &Page) -> usize {
    count_text_nodes(page, &DATE)
}

fn social_proof_totals(page: &Page) -> usize {
    SOCIAL_PROOF_TOTAL
        .captures_iter(page.text())
        .filter_map(|caps| {
            let value = caps.get(1)?.as_str().replace(',', "").parse::<usize>().ok()?;
            let multiplier = if caps.get(2).is_some() { 1000 } else { 1 };
            Some(value.saturating_mul(multiplier))
        })
        .fold(0usize, usize::saturating_add)
}

/// `aggregateRating.ratingValue` from the first JSON-LD block that carries one
pub fn average_rating(page: &Page) -> Option<f64> {
    for block in page.json_ld_blocks() {
        match rating_value(&block) {
            Ok(Some(value)) => return as_number(&value),
            Ok(None) => continue,
            Err(e) => tracing::debug!(error = %e, "skipping structured data block"),
        }
    }
    None
}

fn rating_value(block: &str) -> Result<Option<Value>> {
    let json: Value = serde_json::from_str(block)
        .map_err(|e| PageError::Extraction(format!("invalid JSON-LD: {e}")))?;

    let item = match &json {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    Ok(item
        .and_then(|item| item.get("aggregateRating"))
        .and_then(|rating| rating.get("ratingValue"))
        .cloned())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
