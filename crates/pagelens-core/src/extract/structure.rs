//! Layout summary: heading outline, DOM depth and CTA grouping

use std::collections::HashMap;

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::extract::cta::CtaMatch;
use crate::parser::{Page, element_text, parent_element};
use crate::patterns::contains_currency_amount;
use crate::site_type::KeywordProfile;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

const MODAL_SELECTOR: &str = "[class*='modal'], [class*='popup'], [role='dialog'], dialog";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureSignals {
    /// `"h2: Features"` entries in document order
    pub heading_hierarchy: Vec<String>,
    pub h1_count: usize,
    pub has_subheadings: bool,
    pub max_dom_depth: usize,
    pub section_count: usize,
    pub main_present: bool,
    pub cta_grouping: bool,
    pub cta_position: Option<usize>,
    pub gallery_present: bool,
    pub modals_with_cta: bool,
}

pub fn extract(
    page: &Page,
    cta: Option<&CtaMatch<'_>>,
    profile: &KeywordProfile,
    cta_keywords: &[&str],
) -> StructureSignals {
    StructureSignals {
        heading_hierarchy: heading_hierarchy(page),
        h1_count: page.count("h1"),
        has_subheadings: page.exists("h2, h3"),
        max_dom_depth: max_dom_depth(page.root()),
        section_count: page.count("section"),
        main_present: page.exists("main, [role='main']"),
        cta_grouping: cta.is_some_and(|cta| cta_grouped(&cta.element, profile)),
        cta_position: cta.map(|cta| cta.index),
        gallery_present: gallery_present(page),
        modals_with_cta: modals_with_cta(page, cta_keywords),
    }
}

pub fn heading_hierarchy(page: &Page) -> Vec<String> {
    page.select_all(HEADING_SELECTOR)
        .iter()
        .filter_map(|heading| {
            let text = element_text(heading);
            if text.is_empty() {
                None
            } else {
                Some(format!("{}: {}", heading.value().name(), text))
            }
        })
        .collect()
}

/// Deepest element nesting, counting the root element as 1
pub fn max_dom_depth(root: ElementRef<'_>) -> usize {
    let mut max_depth = 0;
    let mut stack = vec![(root, 1usize)];

    while let Some((element, depth)) = stack.pop() {
        max_depth = max_depth.max(depth);
        stack.extend(
            element
                .children()
                .filter_map(ElementRef::wrap)
                .map(|child| (child, depth + 1)),
        );
    }

    max_depth
}

fn cta_grouped(element: &ElementRef<'_>, profile: &KeywordProfile) -> bool {
    parent_element(element).is_some_and(|parent| {
        let text = element_text(&parent);
        contains_currency_amount(&text) || profile.matches_product(&text.to_lowercase())
    })
}

/// Some element holds more than one `img` as direct children
fn gallery_present(page: &Page) -> bool {
    let mut per_parent = HashMap::new();
    for image in page.find_all("img") {
        if let Some(parent) = parent_element(&image) {
            let count = per_parent.entry(parent.id()).or_insert(0usize);
            *count += 1;
            if *count > 1 {
                return true;
            }
        }
    }
    false
}

fn modals_with_cta(page: &Page, cta_keywords: &[&str]) -> bool {
    page.select_all(MODAL_SELECTOR).iter().any(|modal| {
        let text = element_text(modal).to_lowercase();
        cta_keywords.iter().any(|keyword| text.contains(keyword))
    })
}
