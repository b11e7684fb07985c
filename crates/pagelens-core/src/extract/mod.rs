//! Signal extractors
//!
//! Each extractor is a read-only pass over the same [`Page`](crate::parser::Page)
//! and returns its own typed signal struct. Extractors never fail: anything
//! unexpected in the markup degrades to an empty, zero or `None` value.

pub mod basic;
pub mod cta;
pub mod imagery;
pub mod pricing;
pub mod structure;
pub mod technical;
pub mod testimonials;
pub mod trust;

pub use basic::BasicInfo;
pub use cta::{CtaMatch, CtaSignals};
pub use imagery::ImagerySignals;
pub use pricing::PricingSignals;
pub use structure::StructureSignals;
pub use technical::{HeadingCounts, TechnicalSignals};
pub use testimonials::TestimonialSignals;
pub use trust::TrustSignals;
