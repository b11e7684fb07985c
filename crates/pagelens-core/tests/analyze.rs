//! End-to-end analysis of realistic pages

use pagelens_core::{HeuristicConfig, PageSignals, SiteType, analyze_html};

const PRODUCT: &str = include_str!("fixtures/product.html");
const SAAS: &str = include_str!("fixtures/saas.html");

fn analyze(html: &str) -> PageSignals {
    analyze_html(html, &HeuristicConfig::default())
}

#[test]
fn test_product_page_basics() {
    let signals = analyze(PRODUCT);

    assert_eq!(signals.site_type, SiteType::Ecommerce);
    assert_eq!(signals.basic.title, "Assorted Chocolate Truffle Box | Cocoa & Co");
    assert_eq!(signals.basic.h1, "Assorted Chocolate Truffle Box");
    assert_eq!(signals.pricing.price, "$49.00");
}

#[test]
fn test_product_page_cta() {
    let signals = analyze(PRODUCT);

    assert_eq!(signals.cta.cta.as_deref(), Some("Add to Cart"));
    assert!(signals.cta.price_near_cta);
    assert!(signals.cta.cta_above_fold);
    assert_eq!(signals.cta.interactive_element_count, 4);
    assert_eq!(signals.structure.cta_position, Some(2));
}

#[test]
fn test_product_page_imagery_and_reviews() {
    let signals = analyze(PRODUCT);

    assert_eq!(signals.imagery.image_count, 5);
    assert_eq!(signals.imagery.images_missing_alt, 1);
    assert_eq!(signals.imagery.alt_coverage, 0.8);
    assert!(signals.structure.gallery_present);

    assert_eq!(signals.testimonials.testimonials, 2);
    assert_eq!(signals.testimonials.testimonial_source.as_deref(), Some("nested_items"));
    assert!(signals.testimonials.has_reviews_or_ratings);
    assert_eq!(signals.testimonials.average_rating, Some(4.8));
}

#[test]
fn test_product_page_trust_and_technical() {
    let signals = analyze(PRODUCT);

    assert_eq!(signals.trust.security_badges, 1);
    assert_eq!(signals.trust.guarantee_mentions, 2);
    assert_eq!(signals.trust.social_proof_mentions, 1);

    let technical = &signals.technical;
    assert_eq!(technical.form_count, 2);
    assert_eq!(technical.form_field_count, 2);
    assert_eq!(technical.headings.h1, 2);
    assert_eq!(technical.headings.h2, 2);
    assert!(technical.has_viewport_meta);
    assert!(technical.has_meta_description);
    assert!(technical.has_open_graph);
    assert!(technical.has_canonical);
    assert!(technical.has_breadcrumbs);
    assert!(technical.has_related_items);
    assert!(technical.has_search);
    assert_eq!(technical.html_bytes, PRODUCT.len());
    assert_eq!(technical.external_script_count, 1);
    assert_eq!(technical.inline_script_count, 1);
    assert_eq!(technical.unlabeled_buttons, 0);
    assert_eq!(technical.unlabeled_links, 0);
    assert!(signals.structure.main_present);
}

#[test]
fn test_saas_page() {
    let signals = analyze(SAAS);

    assert_eq!(signals.site_type, SiteType::Saas);
    assert_eq!(signals.basic.h1, "Analytics workspace your whole team understands");
    assert_eq!(signals.pricing.price, "$29/mo");
    assert_eq!(signals.pricing.pricing_keyword_hits, 4);

    // fourth of five interactive elements, past the SaaS fold of three
    assert_eq!(signals.cta.cta.as_deref(), Some("Start free trial"));
    assert!(!signals.cta.cta_above_fold);

    assert_eq!(signals.testimonials.testimonial_source.as_deref(), Some("attributed_roles"));
    assert_eq!(signals.trust.compliance_mentions, 2);
    assert_eq!(signals.trust.numeric_social_proof, 1);
    assert_eq!(signals.technical.unlabeled_buttons, 1);
    assert!(!signals.technical.has_viewport_meta);
}

#[test]
fn test_signals_serialize_to_flat_object() {
    let json = serde_json::to_value(analyze(PRODUCT)).unwrap();
    let object = json.as_object().unwrap();

    for key in [
        "site_type",
        "title",
        "h1",
        "price",
        "cta",
        "price_near_cta",
        "cta_above_fold",
        "shipping_returns_near_cta",
        "image_count",
        "images_missing_alt",
        "alt_coverage",
        "testimonials",
        "has_reviews_or_ratings",
        "average_rating",
        "security_badges",
        "guarantee_mentions",
        "form_count",
        "popup_count",
        "headings",
        "html_bytes",
        "heading_hierarchy",
        "max_dom_depth",
        "cta_position",
        "conversion_scores",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert_eq!(json["site_type"], "ecommerce");
}
