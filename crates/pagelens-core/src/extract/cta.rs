//! Call-to-action detection and its placement relative to price and shipping info

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::config::FoldThreshold;
use crate::parser::{Page, ancestors, element_text, parent_element};
use crate::patterns::contains_currency_amount;

/// Every element a visitor can click, in document order
pub const INTERACTIVE_SELECTOR: &str =
    "button, a, input[type='submit'], input[type='button'], input[type='image'], [role='button']";

const SHIPPING_RETURNS: &[&str] = &["free shipping", "shipping", "delivery", "returns", "refund"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtaSignals {
    pub cta: Option<String>,
    pub price_near_cta: bool,
    pub cta_above_fold: bool,
    pub shipping_returns_near_cta: bool,
    pub interactive_element_count: usize,
}

/// The element chosen as the primary call to action
#[derive(Debug, Clone)]
pub struct CtaMatch<'a> {
    pub element: ElementRef<'a>,
    /// Position among all interactive elements
    pub index: usize,
    /// The label that carried the keyword
    pub text: String,
}

/// Non-empty labels of an element: value attribute, then aria-label, then visible text
pub fn labels(element: &ElementRef<'_>) -> Vec<String> {
    let mut labels: Vec<String> = ["value", "aria-label"]
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    let text = element_text(element);
    if !text.is_empty() {
        labels.push(text);
    }
    labels
}

pub fn interactive_elements(page: &Page) -> Vec<ElementRef<'_>> {
    page.select_all(INTERACTIVE_SELECTOR)
}

/// First interactive element with a label containing a CTA keyword.
///
/// Form buttons often carry an id in `value` ("add-to-cart" = "123"), so
/// every label is tried before moving on.
pub fn locate<'a>(interactive: &[ElementRef<'a>], keywords: &[&str]) -> Option<CtaMatch<'a>> {
    interactive.iter().enumerate().find_map(|(index, element)| {
        labels(element)
            .into_iter()
            .find(|label| {
                let label = label.to_lowercase();
                keywords.iter().any(|keyword| label.contains(keyword))
            })
            .map(|text| CtaMatch {
                element: *element,
                index,
                text,
            })
    })
}

pub fn extract(
    cta: Option<&CtaMatch<'_>>,
    interactive_total: usize,
    fold: FoldThreshold,
    price_proximity_depth: usize,
) -> CtaSignals {
    let Some(cta) = cta else {
        return CtaSignals {
            interactive_element_count: interactive_total,
            ..CtaSignals::default()
        };
    };

    CtaSignals {
        cta: Some(cta.text.clone()),
        price_near_cta: price_near(&cta.element, price_proximity_depth),
        cta_above_fold: fold.contains(cta.index, interactive_total),
        shipping_returns_near_cta: shipping_near(&cta.element),
        interactive_element_count: interactive_total,
    }
}

fn price_near(element: &ElementRef<'_>, depth: usize) -> bool {
    labels(element)
        .iter()
        .any(|label| contains_currency_amount(label))
        || ancestors(element, depth)
            .iter()
            .any(|ancestor| contains_currency_amount(&element_text(ancestor)))
}

fn shipping_near(element: &ElementRef<'_>) -> bool {
    parent_element(element)
        .map(|parent| element_text(&parent).to_lowercase())
        .is_some_and(|text| SHIPPING_RETURNS.iter().any(|term| text.contains(term)))
}
