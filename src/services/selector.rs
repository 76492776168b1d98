use std::sync::Arc;

use crate::{
    models::{ImageIndex, PurchaseQuery, Recommendation, SeasonRanking},
    services::images::resolve_image,
};

/// Upper bound on recommendations per query, regardless of the configured `top_n`
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Pairs ranked candidate items with ranked candidate colors
///
/// The selector hands over items (purchased item already removed) and colors, both in
/// rank order and both truncated to the recommendation limit. Implementations decide
/// which color goes with which item.
#[cfg_attr(test, mockall::automock)]
pub trait PairingStrategy: Send + Sync {
    fn pair(&self, items: &[String], colors: &[String]) -> Vec<(String, String)>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Pairs the i-th ranked item with the i-th ranked color
///
/// Colors are not checked against the item they land on, so combinations such as a
/// color never sold for that item are expected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalPairing;

impl PairingStrategy for PositionalPairing {
    fn pair(&self, items: &[String], colors: &[String]) -> Vec<(String, String)> {
        items
            .iter()
            .zip(colors.iter())
            .map(|(item, color)| (item.clone(), color.clone()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}

/// Selects seasonal recommendations for a single purchase
#[derive(Clone)]
pub struct Recommender {
    strategy: Arc<dyn PairingStrategy>,
    top_n: usize,
}

impl Recommender {
    /// Recommender using positional pairing
    pub fn new(top_n: usize) -> Self {
        Self::with_strategy(Arc::new(PositionalPairing), top_n)
    }

    pub fn with_strategy(strategy: Arc<dyn PairingStrategy>, top_n: usize) -> Self {
        Self { strategy, top_n }
    }

    /// Effective number of recommendations per query
    pub fn limit(&self) -> usize {
        self.top_n.min(MAX_RECOMMENDATIONS)
    }

    /// Recommendations for `query`, never empty
    ///
    /// Falls back to [`Recommendation::none`] when the season is unknown or every
    /// ranked item was excluded.
    pub fn recommend(
        &self,
        query: &PurchaseQuery,
        top_items: &SeasonRanking,
        top_colors: &SeasonRanking,
        images: &ImageIndex,
    ) -> Vec<Recommendation> {
        let limit = self.limit();

        let candidate_items: Vec<String> = top_items
            .get(&query.season)
            .iter()
            .filter(|item| **item != query.item_purchased)
            .take(limit)
            .cloned()
            .collect();

        let candidate_colors: Vec<String> = top_colors
            .get(&query.season)
            .iter()
            .take(limit)
            .cloned()
            .collect();

        let recommendations: Vec<Recommendation> = self
            .strategy
            .pair(&candidate_items, &candidate_colors)
            .into_iter()
            .take(limit)
            .map(|(item, color)| {
                let image_url = resolve_image(images, &item, &color);
                Recommendation::new(item, color, image_url)
            })
            .collect();

        tracing::debug!(
            season = %query.season,
            purchased_item = %query.item_purchased,
            purchased_color = %query.color,
            strategy = self.strategy.name(),
            items = candidate_items.len(),
            colors = candidate_colors.len(),
            recommended = recommendations.len(),
            "Selected recommendations"
        );

        if recommendations.is_empty() {
            return vec![Recommendation::none()];
        }

        recommendations
    }
}

/// Recommend up to `top_n` (at most three) seasonal items for a purchase
///
/// Uses positional pairing. The purchased color is accepted for the query context but
/// does not influence which colors are suggested.
pub fn recommend(
    season: &str,
    purchased_item: &str,
    purchased_color: &str,
    top_items: &SeasonRanking,
    top_colors: &SeasonRanking,
    images: &ImageIndex,
    top_n: usize,
) -> Vec<Recommendation> {
    let query = PurchaseQuery {
        season: season.to_string(),
        item_purchased: purchased_item.to_string(),
        color: purchased_color.to_string(),
    };
    Recommender::new(top_n).recommend(&query, top_items, top_colors, images)
}
