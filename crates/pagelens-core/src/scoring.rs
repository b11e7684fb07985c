//! Heuristic conversion scores derived from the extracted signals

use serde::{Deserialize, Serialize};

use crate::types::PageSignals;

pub const MAX_SCORE: u8 = 10;

/// Category scores on a 0-10 scale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionScores {
    pub value_proposition_clarity: u8,
    pub cta_effectiveness: u8,
    pub trust_social_proof: u8,
    pub visual_imagery: u8,
    pub mobile_accessibility: u8,
    pub technical_performance: u8,
    pub user_experience: u8,
    pub conversion_optimization: u8,
    /// Mean of the eight categories, one decimal
    pub overall_score: f64,
}

impl ConversionScores {
    pub fn categories(&self) -> [u8; 8] {
        [
            self.value_proposition_clarity,
            self.cta_effectiveness,
            self.trust_social_proof,
            self.visual_imagery,
            self.mobile_accessibility,
            self.technical_performance,
            self.user_experience,
            self.conversion_optimization,
        ]
    }

    fn with_overall(mut self) -> Self {
        let categories = self.categories();
        let sum: u32 = categories.iter().map(|&score| u32::from(score)).sum();
        let mean = f64::from(sum) / categories.len() as f64;
        self.overall_score = (mean * 10.0).round() / 10.0;
        self
    }
}

/// Sum of the points for every rule that holds, capped at [`MAX_SCORE`]
fn award(rules: &[(bool, u8)]) -> u8 {
    rules
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, points)| *points)
        .fold(0u8, u8::saturating_add)
        .min(MAX_SCORE)
}

pub fn score(signals: &PageSignals) -> ConversionScores {
    ConversionScores {
        value_proposition_clarity: clarity(signals),
        cta_effectiveness: cta(signals),
        trust_social_proof: trust(signals),
        visual_imagery: imagery(signals),
        mobile_accessibility: mobile_accessibility(signals),
        technical_performance: technical_performance(signals),
        user_experience: user_experience(signals),
        conversion_optimization: conversion_optimization(signals),
        overall_score: 0.0,
    }
    .with_overall()
}

fn clarity(s: &PageSignals) -> u8 {
    award(&[
        (!s.basic.title.is_empty(), 2),
        (!s.basic.h1.is_empty(), 3),
        (s.technical.has_meta_description, 2),
        (s.structure.h1_count == 1, 2),
        (s.structure.has_subheadings, 1),
    ])
}

fn cta(s: &PageSignals) -> u8 {
    award(&[
        (s.cta.cta.is_some(), 4),
        (s.cta.cta_above_fold, 3),
        (s.cta.price_near_cta, 2),
        (s.cta.shipping_returns_near_cta, 1),
    ])
}

fn trust(s: &PageSignals) -> u8 {
    let t = &s.trust;
    award(&[
        (s.testimonials.testimonials > 0, 3),
        (s.testimonials.has_reviews_or_ratings, 1),
        (s.testimonials.average_rating.is_some(), 1),
        (t.guarantee_mentions > 0, 2),
        (t.security_badges + t.badge_count > 0, 1),
        (t.social_proof_mentions + t.numeric_social_proof > 0, 1),
        (t.trust_keyword_hits >= 2, 1),
    ])
}

fn imagery(s: &PageSignals) -> u8 {
    let i = &s.imagery;
    let alt_points = (i.alt_coverage * 3.0).round() as u8;
    award(&[
        (i.image_count > 0, 3),
        (i.image_count >= 3, 2),
        (s.structure.gallery_present, 2),
        (i.image_count > 0, alt_points),
    ])
}

fn mobile_accessibility(s: &PageSignals) -> u8 {
    let t = &s.technical;
    award(&[
        (t.has_viewport_meta, 4),
        (s.imagery.alt_coverage >= 0.9 || s.imagery.image_count == 0, 2),
        (t.unlabeled_buttons == 0, 2),
        (t.unlabeled_links == 0, 2),
    ])
}

/// Starts from the maximum and deducts for heavy pages
fn technical_performance(s: &PageSignals) -> u8 {
    let t = &s.technical;
    let deductions: u8 = [
        (t.html_bytes > 500_000, 3u8),
        (t.html_bytes > 200_000 && t.html_bytes <= 500_000, 1),
        (t.external_script_count > 20, 3),
        (t.external_script_count > 10 && t.external_script_count <= 20, 1),
        (t.inline_script_count > 20, 1),
        (!t.has_canonical, 1),
        (!t.has_open_graph, 1),
    ]
    .iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, points)| *points)
    .sum();

    MAX_SCORE.saturating_sub(deductions)
}

fn user_experience(s: &PageSignals) -> u8 {
    let t = &s.technical;
    award(&[
        (s.structure.main_present, 2),
        (t.has_breadcrumbs, 2),
        (t.has_search, 2),
        (t.has_related_items, 2),
        (t.popup_count == 0, 2),
    ])
}

fn conversion_optimization(s: &PageSignals) -> u8 {
    award(&[
        (!s.pricing.price.is_empty(), 3),
        (s.cta.price_near_cta, 2),
        (s.cta.cta_above_fold, 2),
        (s.structure.cta_grouping, 2),
        (s.technical.form_field_count <= 5, 1),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicConfig;

    fn scores_for(html: &str) -> ConversionScores {
        crate::analyze_html(html, &HeuristicConfig::default()).conversion_scores
    }

    #[test]
    fn test_award_caps_at_max() {
        assert_eq!(award(&[(true, 6), (true, 7)]), MAX_SCORE);
        assert_eq!(award(&[(false, 6), (true, 2)]), 2);
        assert_eq!(award(&[]), 0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let pages = [
            "",
            "<p>plain</p>",
            r#"<html><head><title>Lamp</title><meta name="viewport" content="width=device-width"></head>
               <body><main><h1>Desk Lamp</h1><div><span class="price">$89.00</span><button>Add to cart</button>
               <p>Free shipping</p></div><img src="a" alt="Lamp"><img src="b" alt="Lamp lit"></main></body></html>"#,
        ];
        for html in pages {
            let scores = scores_for(html);
            for category in scores.categories() {
                assert!(category <= MAX_SCORE);
            }
            assert!((0.0..=10.0).contains(&scores.overall_score));
        }
    }

    #[test]
    fn test_better_page_scores_higher() {
        let bare = scores_for("<p>Welcome</p>");
        let rich = scores_for(
            r#"<html><head><title>Desk Lamp</title>
               <meta name="viewport" content="width=device-width">
               <meta name="description" content="A dimmable desk lamp">
               <link rel="canonical" href="https://shop.example/lamp"></head>
               <body><main><h1>Desk Lamp</h1><h2>Details</h2>
               <div><span class="price">$89.00</span><button>Add to cart</button></div>
               <p>30-day money-back guarantee</p></main></body></html>"#,
        );
        assert!(rich.cta_effectiveness > bare.cta_effectiveness);
        assert!(rich.value_proposition_clarity > bare.value_proposition_clarity);
        assert!(rich.overall_score > bare.overall_score);
    }

    #[test]
    fn test_overall_is_mean_of_categories() {
        let scores = ConversionScores {
            value_proposition_clarity: 10,
            cta_effectiveness: 5,
            ..ConversionScores::default()
        }
        .with_overall();
        // 15 / 8 = 1.875
        assert_eq!(scores.overall_score, 1.9);
    }
}
