use serde::{Deserialize, Serialize};

use crate::parser::Page;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagerySignals {
    pub image_count: usize,
    pub images_missing_alt: usize,
    /// Share of images with a non-blank alt, two decimals
    pub alt_coverage: f64,
}

pub fn extract(page: &Page) -> ImagerySignals {
    let images = page.find_all("img");
    let image_count = images.len();
    let images_missing_alt = images
        .iter()
        .filter(|img| img.value().attr("alt").is_none_or(|alt| alt.trim().is_empty()))
        .count();

    ImagerySignals {
        image_count,
        images_missing_alt,
        alt_coverage: coverage(image_count, images_missing_alt),
    }
}

fn coverage(total: usize, missing: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = (total - missing) as f64 / total as f64;
    (ratio * 100.0).round() / 100.0
}
