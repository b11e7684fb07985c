//! Tunable heuristic thresholds

use serde::{Deserialize, Serialize};

use crate::site_type::SiteType;

/// How many leading interactive elements count as "above the fold".
///
/// An element at index `i` is above the fold when
/// `i < max(min_elements, round(fraction * total))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldThreshold {
    pub min_elements: usize,
    pub fraction: f64,
}

impl FoldThreshold {
    pub const fn new(min_elements: usize, fraction: f64) -> Self {
        Self {
            min_elements,
            fraction,
        }
    }

    pub fn limit(&self, total: usize) -> usize {
        let scaled = (self.fraction * total as f64).round() as usize;
        self.min_elements.max(scaled)
    }

    pub fn contains(&self, index: usize, total: usize) -> bool {
        index < self.limit(total)
    }
}

/// Thresholds shared by the extractors.
///
/// Values differ between historic versions of these heuristics, so they are
/// kept here instead of being baked into the extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Minimum value for a bare or ranged currency amount to count as the price
    pub min_price: f64,
    /// Minimum value for per-unit amounts ("$9/mo")
    pub min_unit_price: f64,
    /// Ancestors of the CTA searched for a currency amount
    pub price_proximity_depth: usize,
    pub fold: FoldThreshold,
    /// Looser fold for product and booking pages, which carry long headers
    pub fold_ecommerce: FoldThreshold,
    pub fold_service: FoldThreshold,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_price: 10.0,
            min_unit_price: 0.01,
            price_proximity_depth: 3,
            fold: FoldThreshold::new(3, 0.1),
            fold_ecommerce: FoldThreshold::new(5, 0.2),
            fold_service: FoldThreshold::new(5, 0.2),
        }
    }
}

impl HeuristicConfig {
    pub fn fold_for(&self, site_type: SiteType) -> FoldThreshold {
        match site_type {
            SiteType::Ecommerce => self.fold_ecommerce,
            SiteType::Service => self.fold_service,
            _ => self.fold,
        }
    }
}
