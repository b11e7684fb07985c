//! Coarse site classification and per-category keyword vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse page category used to pick keyword vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Ecommerce,
    Saas,
    B2B,
    Service,
    Generic,
}

/// Keyword vocabulary used by the H1, CTA and pricing heuristics
#[derive(Debug)]
pub struct KeywordProfile {
    pub product: &'static [&'static str],
    pub cta: &'static [&'static str],
    pub pricing: &'static [&'static str],
}

/// Categories in tie-break order
const CLASSIFIED: [SiteType; 4] = [
    SiteType::Ecommerce,
    SiteType::Saas,
    SiteType::B2B,
    SiteType::Service,
];

const ECOMMERCE_SIGNALS: &[&str] = &[
    "add to cart",
    "add to bag",
    "buy now",
    "shop now",
    "checkout",
    "free shipping",
    "in stock",
    "out of stock",
    "shopping cart",
    "sku",
    "returns",
    "wishlist",
];

const SAAS_SIGNALS: &[&str] = &[
    "free trial",
    "start trial",
    "sign up",
    "per month",
    "/mo",
    "per user",
    "subscription",
    "dashboard",
    "integrations",
    "api",
    "cancel anytime",
    "software",
];

const B2B_SIGNALS: &[&str] = &[
    "enterprise",
    "request a demo",
    "book a demo",
    "contact sales",
    "case studies",
    "case study",
    "solutions",
    "partners",
    "industries",
    "roi",
    "whitepaper",
    "procurement",
];

const SERVICE_SIGNALS: &[&str] = &[
    "book an appointment",
    "schedule a call",
    "consultation",
    "our services",
    "get a quote",
    "free estimate",
    "call us",
    "appointment",
    "licensed",
    "service area",
    "hire",
    "same-day",
];

static ECOMMERCE_PROFILE: KeywordProfile = KeywordProfile {
    product: &[
        "product", "collection", "box", "set", "kit", "bundle", "pack", "edition", "gift",
        "chocolate", "shoe", "shirt", "dress", "bag",
    ],
    cta: &[
        "add to cart",
        "add to bag",
        "buy now",
        "buy it now",
        "shop now",
        "order now",
        "checkout",
        "purchase",
    ],
    pricing: &["price", "sale", "discount", "% off", "free shipping", "in stock", "save"],
};

static SAAS_PROFILE: KeywordProfile = KeywordProfile {
    product: &["platform", "software", "app", "tool", "automation", "analytics", "workspace"],
    cta: &[
        "start free trial",
        "start trial",
        "try free",
        "try it free",
        "get started",
        "sign up",
        "start now",
        "create account",
    ],
    pricing: &["pricing", "per month", "per user", "annual", "monthly", "plan", "billed"],
};

static B2B_PROFILE: KeywordProfile = KeywordProfile {
    product: &["solution", "platform", "enterprise", "suite", "services", "infrastructure"],
    cta: &[
        "request a demo",
        "book a demo",
        "schedule a demo",
        "contact sales",
        "talk to sales",
        "get a demo",
    ],
    pricing: &["custom pricing", "quote", "enterprise plan", "contact sales", "volume"],
};

static SERVICE_PROFILE: KeywordProfile = KeywordProfile {
    product: &["service", "repair", "cleaning", "consulting", "installation", "treatment"],
    cta: &[
        "book now",
        "book an appointment",
        "schedule",
        "get a quote",
        "request a quote",
        "call now",
        "contact us",
    ],
    pricing: &["rate", "hourly", "estimate", "quote", "starting at", "packages"],
};

static GENERIC_PROFILE: KeywordProfile = KeywordProfile {
    product: &["product", "service", "solution", "platform"],
    cta: &["get started", "buy", "order", "contact", "sign up", "join"],
    pricing: &["price", "pricing", "cost", "plan"],
};

/// Fallback CTA phrases appended after the category phrases
pub const GENERIC_CTA_PHRASES: &[&str] = &[
    "add to cart",
    "buy now",
    "shop now",
    "order now",
    "get started",
    "sign up",
    "start free trial",
    "book now",
    "request a demo",
    "get a quote",
    "contact us",
    "learn more",
    "download",
    "subscribe",
];

impl SiteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::Ecommerce => "ecommerce",
            SiteType::Saas => "saas",
            SiteType::B2B => "b2b",
            SiteType::Service => "service",
            SiteType::Generic => "generic",
        }
    }

    /// Text signals counted during classification
    fn signals(&self) -> &'static [&'static str] {
        match self {
            SiteType::Ecommerce => ECOMMERCE_SIGNALS,
            SiteType::Saas => SAAS_SIGNALS,
            SiteType::B2B => B2B_SIGNALS,
            SiteType::Service => SERVICE_SIGNALS,
            SiteType::Generic => &[],
        }
    }

    pub fn profile(&self) -> &'static KeywordProfile {
        match self {
            SiteType::Ecommerce => &ECOMMERCE_PROFILE,
            SiteType::Saas => &SAAS_PROFILE,
            SiteType::B2B => &B2B_PROFILE,
            SiteType::Service => &SERVICE_PROFILE,
            SiteType::Generic => &GENERIC_PROFILE,
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl KeywordProfile {
    /// Category CTA phrases followed by the generic fallbacks, without duplicates
    pub fn cta_keywords(&self) -> Vec<&'static str> {
        let mut keywords: Vec<&'static str> = self.cta.to_vec();
        for phrase in GENERIC_CTA_PHRASES {
            if !keywords.contains(phrase) {
                keywords.push(*phrase);
            }
        }
        keywords
    }

    pub fn matches_product(&self, text_lower: &str) -> bool {
        self.product.iter().any(|keyword| text_lower.contains(keyword))
    }
}

/// Number of distinct keywords from `keywords` that occur in `text_lower`
pub fn keyword_hits(text_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count()
}

/// Classify case-folded page text.
///
/// The strictly highest keyword count wins; ties keep the earlier category
/// and a page with no hits at all is [`SiteType::Generic`].
pub fn classify(text_lower: &str) -> SiteType {
    let mut best = SiteType::Generic;
    let mut best_score = 0;

    for site_type in CLASSIFIED {
        let score = keyword_hits(text_lower, site_type.signals());
        tracing::debug!(site_type = %site_type, score, "site type score");
        if score > best_score {
            best = site_type;
            best_score = score;
        }
    }

    best
}
