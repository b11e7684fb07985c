//! Page title and primary heading

use serde::{Deserialize, Serialize};

use crate::parser::{Page, element_text};
use crate::site_type::KeywordProfile;

const H1_SELECTOR: &str = "h1, [role='heading'][aria-level='1']";

/// Heading text that usually belongs to site chrome rather than the offer
const UI_NOISE: &[&str] = &[
    "cart",
    "checkout",
    "login",
    "sign in",
    "menu",
    "navigation",
    "your",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub title: String,
    pub h1: String,
}

type H1Strategy = fn(&Page, &KeywordProfile) -> Option<String>;

/// Evaluated in order, first hit wins
const H1_STRATEGIES: &[(&str, H1Strategy)] = &[
    ("h1_with_product_keyword", h1_with_product_keyword),
    ("h1_without_ui_noise", h1_without_ui_noise),
    ("subheading_with_product_keyword", subheading_with_product_keyword),
    ("first_h1", first_h1),
];

pub fn extract(page: &Page, profile: &KeywordProfile) -> BasicInfo {
    BasicInfo {
        title: extract_title(page),
        h1: select_h1(page, profile),
    }
}

pub fn extract_title(page: &Page) -> String {
    page.select_first("title")
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

pub fn select_h1(page: &Page, profile: &KeywordProfile) -> String {
    H1_STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            let heading = strategy(page, profile)?;
            tracing::debug!(strategy = *name, heading = %heading, "h1 selected");
            Some(heading)
        })
        .unwrap_or_default()
}

fn h1_texts(page: &Page) -> Vec<String> {
    page.select_all(H1_SELECTOR)
        .iter()
        .map(element_text)
        .collect()
}

fn h1_with_product_keyword(page: &Page, profile: &KeywordProfile) -> Option<String> {
    h1_texts(page)
        .into_iter()
        .filter(|text| !text.is_empty())
        .find(|text| profile.matches_product(&text.to_lowercase()))
}

fn h1_without_ui_noise(page: &Page, _profile: &KeywordProfile) -> Option<String> {
    h1_texts(page).into_iter().filter(|text| !text.is_empty()).find(|text| {
        let lower = text.to_lowercase();
        !UI_NOISE.iter().any(|noise| lower.contains(noise))
    })
}

fn subheading_with_product_keyword(page: &Page, profile: &KeywordProfile) -> Option<String> {
    ["h2", "h3", "h4", "h5", "h6"].iter().find_map(|level| {
        page.select_all(level)
            .iter()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .find(|text| profile.matches_product(&text.to_lowercase()))
    })
}

fn first_h1(page: &Page, _profile: &KeywordProfile) -> Option<String> {
    h1_texts(page).into_iter().next()
}
