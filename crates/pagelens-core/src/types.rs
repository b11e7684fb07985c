//! The aggregated signal set produced for one page

use serde::{Deserialize, Serialize};

use crate::extract::{
    BasicInfo, CtaSignals, ImagerySignals, PricingSignals, StructureSignals, TechnicalSignals,
    TestimonialSignals, TrustSignals,
};
use crate::scoring::ConversionScores;
use crate::site_type::SiteType;

/// Every signal extracted from a page.
///
/// Serializes to one flat JSON object: each extractor's struct is flattened
/// into the top level, so every key is always present and no extractor can
/// shadow another's field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    pub site_type: SiteType,
    #[serde(flatten)]
    pub basic: BasicInfo,
    #[serde(flatten)]
    pub pricing: PricingSignals,
    #[serde(flatten)]
    pub cta: CtaSignals,
    #[serde(flatten)]
    pub imagery: ImagerySignals,
    #[serde(flatten)]
    pub testimonials: TestimonialSignals,
    #[serde(flatten)]
    pub trust: TrustSignals,
    #[serde(flatten)]
    pub technical: TechnicalSignals,
    #[serde(flatten)]
    pub structure: StructureSignals,
    pub conversion_scores: ConversionScores,
}

impl PageSignals {
    /// Compact JSON, the form embedded into report prompts
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn key_count<T: Serialize>(value: &T) -> usize {
        match serde_json::to_value(value).unwrap() {
            Value::Object(map) => map.len(),
            other => panic!("expected an object, got {other}"),
        }
    }

    fn sample() -> PageSignals {
        PageSignals {
            site_type: SiteType::Generic,
            basic: BasicInfo::default(),
            pricing: PricingSignals::default(),
            cta: CtaSignals::default(),
            imagery: ImagerySignals::default(),
            testimonials: TestimonialSignals::default(),
            trust: TrustSignals::default(),
            technical: TechnicalSignals::default(),
            structure: StructureSignals::default(),
            conversion_scores: ConversionScores::default(),
        }
    }

    #[test]
    fn test_flattened_keys_do_not_collide() {
        let signals = sample();
        let parts = key_count(&signals.basic)
            + key_count(&signals.pricing)
            + key_count(&signals.cta)
            + key_count(&signals.imagery)
            + key_count(&signals.testimonials)
            + key_count(&signals.trust)
            + key_count(&signals.technical)
            + key_count(&signals.structure);

        // site_type and conversion_scores sit beside the flattened parts
        assert_eq!(key_count(&signals), parts + 2);
    }

    #[test]
    fn test_serializes_flat_with_nulls() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["site_type"], "generic");
        assert_eq!(json["price"], "");
        assert!(json["cta"].is_null());
        assert!(json["average_rating"].is_null());
        assert!(json["cta_position"].is_null());
        assert_eq!(json["headings"]["h1"], 0);
        assert!(json["conversion_scores"]["overall_score"].is_number());
    }

    #[test]
    fn test_round_trips_through_json() {
        let signals = sample();
        let json = signals.to_compact_json().unwrap();
        assert!(!json.contains('\n'));
        let back: PageSignals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signals);
    }
}
