use serde::Serialize;
use std::collections::BTreeMap;

pub mod image;
pub mod purchase;
pub mod recommendation;

pub use image::{ImageEntry, ImageIndex};
pub use purchase::{PurchaseQuery, PurchaseRecord};
pub use recommendation::{Recommendation, IMAGE_NOT_AVAILABLE, NO_COLOR, NO_RECOMMENDATION};

/// Per-season values ranked by descending purchase frequency
///
/// Used for both the top items and the top colors of each season. Ties keep the order in
/// which values were first seen in the purchase history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeasonRanking(BTreeMap<String, Vec<String>>);

impl SeasonRanking {
    pub fn new(rankings: BTreeMap<String, Vec<String>>) -> Self {
        Self(rankings)
    }

    /// Ranked values for a season; an unknown season yields an empty slice
    pub fn get(&self, season: &str) -> &[String] {
        self.0.get(season).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn seasons(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Customer purchase paired with the recommendations derived from it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRecommendations {
    pub purchase: PurchaseRecord,
    pub recommendations: Vec<Recommendation>,
}
