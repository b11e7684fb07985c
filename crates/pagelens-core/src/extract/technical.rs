//! Technical, SEO and accessibility proxies

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extract::basic::extract_title;
use crate::parser::{Page, element_text};

const FORM_FIELD_SELECTOR: &str =
    "form input:not([type='hidden']), form select, form textarea";

const POPUP_SELECTOR: &str =
    "[class*='popup'], [class*='modal'], [class*='lightbox'], [role='dialog'], [role='alertdialog'], dialog";

const BREADCRUMB_SELECTOR: &str = "[class*='breadcrumb'], [id*='breadcrumb'], [aria-label*='readcrumb'], [itemtype*='BreadcrumbList']";

const RELATED_SELECTOR: &str = "[class*='related'], [id*='related'], [class*='recommend'], [class*='also-like'], [class*='upsell'], [class*='cross-sell']";

const RELATED_PHRASES: &[&str] = &[
    "related products",
    "you may also like",
    "you might also like",
    "customers also bought",
    "frequently bought together",
];

const SEARCH_SELECTOR: &str = "input[type='search'], [role='search'], form[action*='search'], input[name='q'], input[name*='search']";

/// Number of headings per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingCounts {
    pub fn from_page(page: &Page) -> Self {
        Self {
            h1: page.count("h1"),
            h2: page.count("h2"),
            h3: page.count("h3"),
            h4: page.count("h4"),
            h5: page.count("h5"),
            h6: page.count("h6"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignals {
    pub form_count: usize,
    pub form_field_count: usize,
    pub popup_count: usize,
    pub headings: HeadingCounts,
    pub has_viewport_meta: bool,
    pub has_meta_description: bool,
    pub meta_description_length: usize,
    pub title_length: usize,
    pub has_open_graph: bool,
    pub has_canonical: bool,
    pub has_breadcrumbs: bool,
    pub has_related_items: bool,
    pub has_search: bool,
    pub html_bytes: usize,
    pub external_script_count: usize,
    pub inline_script_count: usize,
    pub unlabeled_buttons: usize,
    pub unlabeled_links: usize,
}

pub fn extract(page: &Page) -> TechnicalSignals {
    let meta_description = page
        .select_first("meta[name='description']")
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty());

    let (external_script_count, inline_script_count) = script_counts(page);

    TechnicalSignals {
        form_count: page.count("form"),
        form_field_count: page.count(FORM_FIELD_SELECTOR),
        popup_count: page.count(POPUP_SELECTOR),
        headings: HeadingCounts::from_page(page),
        has_viewport_meta: page.exists("meta[name='viewport']"),
        has_meta_description: meta_description.is_some(),
        meta_description_length: meta_description.map_or(0, |d| d.chars().count()),
        title_length: extract_title(page).chars().count(),
        has_open_graph: page.exists("meta[property^='og:']"),
        has_canonical: page.exists("link[rel='canonical']"),
        has_breadcrumbs: has_breadcrumbs(page),
        has_related_items: has_related_items(page),
        has_search: page.exists(SEARCH_SELECTOR),
        html_bytes: page.html_bytes(),
        external_script_count,
        inline_script_count,
        unlabeled_buttons: unlabeled(page, "button"),
        unlabeled_links: unlabeled(page, "a[href]"),
    }
}

/// Executable scripts split into (external, inline); data blocks such as JSON-LD are skipped
fn script_counts(page: &Page) -> (usize, usize) {
    page.select_all("script")
        .iter()
        .filter(|script| is_javascript(script.value().attr("type")))
        .fold((0, 0), |(external, inline), script| {
            if script.value().attr("src").is_some() {
                (external + 1, inline)
            } else {
                (external, inline + 1)
            }
        })
}

fn is_javascript(script_type: Option<&str>) -> bool {
    let Some(script_type) = script_type.map(|t| t.trim().to_ascii_lowercase()) else {
        return true;
    };
    let essence = script_type.split(';').next().unwrap_or_default().trim();
    matches!(
        essence,
        "" | "module"
            | "text/javascript"
            | "application/javascript"
            | "text/ecmascript"
            | "application/ecmascript"
            | "application/x-javascript"
    )
}

fn has_breadcrumbs(page: &Page) -> bool {
    page.exists(BREADCRUMB_SELECTOR)
        || page.json_ld_blocks().iter().any(|block| {
            serde_json::from_str::<Value>(block)
                .map(|json| has_schema_type(&json, "BreadcrumbList"))
                .unwrap_or(false)
        })
}

/// Depth-first search for an `@type` equal to (or listing) `name`
fn has_schema_type(value: &Value, name: &str) -> bool {
    match value {
        Value::Object(map) => {
            let matches = match map.get("@type") {
                Some(Value::String(t)) => t == name,
                Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
                _ => false,
            };
            matches || map.values().any(|child| has_schema_type(child, name))
        }
        Value::Array(items) => items.iter().any(|item| has_schema_type(item, name)),
        _ => false,
    }
}

fn has_related_items(page: &Page) -> bool {
    page.exists(RELATED_SELECTOR)
        || RELATED_PHRASES
            .iter()
            .any(|phrase| page.text_lower().contains(phrase))
}

/// Elements with neither visible text nor an aria-label
fn unlabeled(page: &Page, selector: &str) -> usize {
    page.select_all(selector)
        .iter()
        .filter(|element| {
            let aria_label = element.value().attr("aria-label").map(str::trim).unwrap_or("");
            aria_label.is_empty() && element_text(element).is_empty()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forms_and_fields() {
        let html = r#"
            <form>
              <input type="hidden" name="token">
              <input type="email" name="email">
              <select name="size"><option>M</option></select>
              <textarea></textarea>
            </form>
            <input type="text" name="outside">"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.form_count, 1);
        assert_eq!(signals.form_field_count, 3);
    }

    #[test]
    fn test_heading_counts() {
        let html = "<h1>A</h1><h2>B</h2><h2>C</h2><h6>D</h6>";
        let headings = extract(&Page::parse(html)).headings;
        assert_eq!(
            headings,
            HeadingCounts {
                h1: 1,
                h2: 2,
                h6: 1,
                ..HeadingCounts::default()
            }
        );
    }

    #[test]
    fn test_head_metadata() {
        let html = r#"<html><head>
            <title>Trail Runner</title>
            <meta name="viewport" content="width=device-width">
            <meta name="description" content="  Lightweight running shoe  ">
            <meta property="og:title" content="Trail Runner">
            <link rel="canonical" href="https://shop.example/trail-runner">
        </head><body></body></html>"#;
        let signals = extract(&Page::parse(html));
        assert!(signals.has_viewport_meta);
        assert!(signals.has_meta_description);
        assert_eq!(signals.meta_description_length, "Lightweight running shoe".len());
        assert_eq!(signals.title_length, 12);
        assert!(signals.has_open_graph);
        assert!(signals.has_canonical);
    }

    #[test]
    fn test_bare_page_defaults() {
        let signals = extract(&Page::parse("<p>hi</p>"));
        assert!(!signals.has_viewport_meta);
        assert!(!signals.has_meta_description);
        assert_eq!(signals.meta_description_length, 0);
        assert_eq!(signals.title_length, 0);
        assert!(!signals.has_breadcrumbs);
        assert!(!signals.has_related_items);
        assert!(!signals.has_search);
        assert_eq!(signals.html_bytes, "<p>hi</p>".len());
    }

    #[test]
    fn test_breadcrumbs_from_json_ld() {
        let html = r#"<script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[{"@type":"BreadcrumbList","itemListElement":[]}]}
        </script>"#;
        assert!(extract(&Page::parse(html)).has_breadcrumbs);
    }

    #[test]
    fn test_breadcrumbs_from_markup() {
        let html = r#"<nav aria-label="Breadcrumb"><a href="/">Home</a></nav>"#;
        assert!(extract(&Page::parse(html)).has_breadcrumbs);
    }

    #[test]
    fn test_related_and_search() {
        let html = r#"
            <form role="search"><input type="search" name="q"></form>
            <h2>You may also like</h2>"#;
        let signals = extract(&Page::parse(html));
        assert!(signals.has_search);
        assert!(signals.has_related_items);
    }

    #[test]
    fn test_script_counts() {
        let html = r#"<script src="/app.js"></script><script src="https://cdn.example/x.js"></script>
            <script>window.dataLayer = [];</script>"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.external_script_count, 2);
        assert_eq!(signals.inline_script_count, 1);
    }

    #[test]
    fn test_data_blocks_are_not_scripts() {
        let html = r#"<head>
            <script type="application/ld+json">{"@type":"Product","name":"Lamp"}</script>
            <script type="text/template"><li>{{name}}</li></script>
            <script type="importmap">{"imports":{}}</script>
            <script type="module">import "/app.js";</script>
            <script type="text/javascript; charset=utf-8" src="/legacy.js"></script>
        </head>"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.external_script_count, 1);
        assert_eq!(signals.inline_script_count, 1);
    }

    #[test]
    fn test_blank_meta_description_is_missing() {
        let html = r#"<head><meta name="description" content="   "></head>"#;
        let signals = extract(&Page::parse(html));
        assert!(!signals.has_meta_description);
        assert_eq!(signals.meta_description_length, 0);
    }

    #[test]
    fn test_unlabeled_controls() {
        let html = r#"
            <button><svg></svg></button>
            <button aria-label="Close">×</button>
            <button>Buy</button>
            <a href="/cart"><img src="cart.svg"></a>
            <a href="/about">About</a>"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.unlabeled_buttons, 1);
        assert_eq!(signals.unlabeled_links, 1);
        assert_eq!(signals.popup_count, 0);
    }
}
