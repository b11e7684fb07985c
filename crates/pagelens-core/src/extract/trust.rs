//! Trust and credibility signals

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parser::{Page, attr_lower, class_and_id};
use crate::site_type::keyword_hits;

const SECURITY_TERMS: &[&str] = &["secure", "security", "ssl", "certified"];

const TRUST_VOCABULARY: &[&str] = &[
    "secure",
    "guarantee",
    "warranty",
    "certified",
    "verified",
    "trusted",
    "official",
    "licensed",
    "insured",
    "accredited",
    "authentic",
    "privacy",
    "encrypted",
    "safe checkout",
];

const LOGO_SELECTOR: &str = "[class*='logo'] img, [class*='client'] img, [class*='partner'] img, [class*='brand'] img, img[alt*='logo']";

const BADGE_SELECTOR: &str = "[class*='badge'], [class*='certif'], [class*='seal'], [class*='trustmark'], img[alt*='badge'], img[alt*='certified']";

static GUARANTEE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:guarantee[ds]?|warrant(?:y|ies)|refunds?|money[\s-]back|satisfaction|risk[\s-]free)\b")
        .expect("invalid guarantee regex")
});

static SOCIAL_PROOF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:trusted\s+by|used\s+by|loved\s+by|as\s+seen\s+(?:in|on)|featured\s+in|customers\s+love|join(?:ed)?\s+(?:over\s+)?\d)")
        .expect("invalid social proof regex")
});

static COMPLIANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:gdpr|hipaa|soc\s?2|iso\s?27001|pci(?:[\s-]dss)?|ccpa|ada\s+compliant)\b")
        .expect("invalid compliance regex")
});

static AWARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:award(?:s|ed)?(?:[\s-]winning)?|winner|best\s+of\s+\d{4}|editor'?s\s+choice|top[\s-]rated)\b")
        .expect("invalid award regex")
});

static NUMERIC_SOCIAL_PROOF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d[\d,.]*\s*[km+]?\+?\s+(?:happy\s+|satisfied\s+)?(?:customers|users|clients|companies|businesses|teams|members|downloads|reviews|orders|subscribers)\b")
        .expect("invalid numeric social proof regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustSignals {
    pub security_badges: usize,
    pub guarantee_mentions: usize,
    pub trust_keyword_hits: usize,
    pub client_logos: usize,
    pub badge_count: usize,
    pub social_proof_mentions: usize,
    pub compliance_mentions: usize,
    pub award_mentions: usize,
    pub numeric_social_proof: usize,
}

pub fn extract(page: &Page) -> TrustSignals {
    let text = page.text();

    TrustSignals {
        security_badges: security_badges(page),
        guarantee_mentions: GUARANTEE.find_iter(text).count(),
        trust_keyword_hits: keyword_hits(page.text_lower(), TRUST_VOCABULARY),
        client_logos: page.count(LOGO_SELECTOR),
        badge_count: page.count(BADGE_SELECTOR),
        social_proof_mentions: SOCIAL_PROOF.find_iter(text).count(),
        compliance_mentions: COMPLIANCE.find_iter(text).count(),
        award_mentions: AWARD.find_iter(text).count(),
        numeric_social_proof: NUMERIC_SOCIAL_PROOF.find_iter(text).count(),
    }
}

/// Images whose alt, class or id mention security or certification
fn security_badges(page: &Page) -> usize {
    page.find_all("img")
        .iter()
        .filter(|img| {
            let names = format!("{} {}", attr_lower(img, "alt"), class_and_id(img));
            SECURITY_TERMS.iter().any(|term| names.contains(term))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_no_trust_signals() {
        assert_eq!(extract(&Page::parse("<p>Hello</p>")), TrustSignals::default());
    }

    #[test]
    fn test_security_badges_by_alt_and_class() {
        let html = r#"
            <img src="ssl.png" alt="SSL Secured">
            <img src="n.png" class="norton-security">
            <img src="cat.png" alt="A cat">"#;
        assert_eq!(extract(&Page::parse(html)).security_badges, 2);
    }

    #[test]
    fn test_guarantee_mentions_counted_per_occurrence() {
        let html = "<p>30-day money-back guarantee. 2 year warranty. Risk-free refunds.</p>";
        // money-back, guarantee, warranty, risk-free, refunds
        assert_eq!(extract(&Page::parse(html)).guarantee_mentions, 5);
    }

    #[test]
    fn test_trust_keywords_counted_once_each() {
        let html = "<p>Secure checkout. Secure payments. Licensed and insured.</p>";
        assert_eq!(extract(&Page::parse(html)).trust_keyword_hits, 3);
    }

    #[test]
    fn test_logos_and_badges() {
        let html = r#"
            <div class="client-logos"><img src="a.svg"><img src="b.svg"></div>
            <span class="badge">Bestseller</span>
            <div class="certification-seal"></div>"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.client_logos, 2);
        assert_eq!(signals.badge_count, 2);
    }

    #[test]
    fn test_text_mentions() {
        let html = r#"<p>Trusted by teams worldwide. As seen on TV.</p>
            <p>GDPR and SOC 2 ready.</p>
            <p>Award-winning support, Editor's Choice 2023.</p>
            <p>Over 10,000 happy customers and 500+ companies.</p>"#;
        let signals = extract(&Page::parse(html));
        assert_eq!(signals.social_proof_mentions, 2);
        assert_eq!(signals.compliance_mentions, 2);
        assert_eq!(signals.award_mentions, 2);
        assert_eq!(signals.numeric_social_proof, 2);
    }
}
