use std::sync::Arc;

use crate::{
    config::Config,
    error::DataLoadError,
    models::{
        CustomerRecommendations, ImageEntry, ImageIndex, PurchaseQuery, PurchaseRecord,
        Recommendation, SeasonRanking,
    },
    services::{
        aggregator::{top_colors_by_season, top_items_by_season},
        images::build_index,
        loader::{load_images, load_purchases},
        selector::{PairingStrategy, Recommender},
    },
};

/// Loaded dataset plus the seasonal rankings derived from it
///
/// Built once at startup and read-only afterwards; every query borrows it.
#[derive(Clone)]
pub struct Catalog {
    records: Vec<PurchaseRecord>,
    images: ImageIndex,
    top_items: SeasonRanking,
    top_colors: SeasonRanking,
    recommender: Recommender,
}

impl Catalog {
    /// Reads both tables named by `config` and derives the rankings
    ///
    /// Reading the same files twice produces equal catalogs.
    pub fn load(config: &Config) -> Result<Self, DataLoadError> {
        let records = load_purchases(&config.purchases_path)?;
        let images = load_images(&config.images_path)?;
        Ok(Self::from_parts(records, images, config.top_n))
    }

    pub fn from_parts(records: Vec<PurchaseRecord>, images: Vec<ImageEntry>, top_n: usize) -> Self {
        Self::with_recommender(records, images, top_n, Recommender::new(top_n))
    }

    /// Same as [`Catalog::from_parts`] with a custom pairing strategy
    pub fn with_strategy(
        records: Vec<PurchaseRecord>,
        images: Vec<ImageEntry>,
        top_n: usize,
        strategy: Arc<dyn PairingStrategy>,
    ) -> Self {
        let recommender = Recommender::with_strategy(strategy, top_n);
        Self::with_recommender(records, images, top_n, recommender)
    }

    fn with_recommender(
        records: Vec<PurchaseRecord>,
        images: Vec<ImageEntry>,
        top_n: usize,
        recommender: Recommender,
    ) -> Self {
        let top_items = top_items_by_season(&records, top_n);
        let top_colors = top_colors_by_season(&records, top_n);
        let images = build_index(images);

        tracing::info!(
            purchases = records.len(),
            images = images.len(),
            seasons = top_items.len(),
            top_n,
            "Catalog ready"
        );

        Self {
            records,
            images,
            top_items,
            top_colors,
            recommender,
        }
    }

    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn images(&self) -> &ImageIndex {
        &self.images
    }

    pub fn top_items(&self) -> &SeasonRanking {
        &self.top_items
    }

    pub fn top_colors(&self) -> &SeasonRanking {
        &self.top_colors
    }

    /// First purchase whose customer key equals `customer_id` (surrounding whitespace ignored)
    pub fn find_customer(&self, customer_id: &str) -> Option<&PurchaseRecord> {
        let customer_id = customer_id.trim();
        self.records.iter().find(|r| r.customer_id == customer_id)
    }

    pub fn recommend(&self, query: &PurchaseQuery) -> Vec<Recommendation> {
        self.recommender
            .recommend(query, &self.top_items, &self.top_colors, &self.images)
    }

    /// Purchase info and recommendations for a customer, `None` if the key is unknown
    pub fn recommend_for_customer(&self, customer_id: &str) -> Option<CustomerRecommendations> {
        let purchase = self.find_customer(customer_id)?.clone();
        let recommendations = self.recommend(&purchase.to_query());
        Some(CustomerRecommendations {
            purchase,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn records() -> Vec<PurchaseRecord> {
        let mut records = Vec::new();
        for _ in 0..5 {
            records.push(PurchaseRecord::new("", "Coat", "Black", "Winter"));
        }
        for _ in 0..3 {
            records.push(PurchaseRecord::new("", "Scarf", "Red", "Winter"));
        }
        records.push(PurchaseRecord::new("", "Hat", "Blue", "Winter"));
        records.push(PurchaseRecord::new("", "Sandals", "White", "Summer"));

        for (position, record) in records.iter_mut().enumerate() {
            record.customer_id = position.to_string();
        }
        records
    }

    fn catalog() -> Catalog {
        Catalog::from_parts(
            records(),
            vec![ImageEntry::new("Scarf", "Black", "https://img.example/scarf-black.png")],
            3,
        )
    }

    #[test]
    fn test_rankings_derived_on_construction() {
        let catalog = catalog();
        assert_eq!(
            catalog.top_items().get("Winter"),
            ["Coat", "Scarf", "Hat"].map(String::from)
        );
        assert_eq!(
            catalog.top_colors().get("Winter"),
            ["Black", "Red", "Blue"].map(String::from)
        );
    }

    #[test]
    fn test_find_customer_exact_key() {
        let catalog = catalog();
        assert_eq!(catalog.find_customer("5").map(|r| r.item_purchased.as_str()), Some("Scarf"));
        assert_eq!(catalog.find_customer(" 5 ").map(|r| r.customer_id.as_str()), Some("5"));
        assert!(catalog.find_customer("05").is_none());
        assert!(catalog.find_customer("100").is_none());
    }

    #[test]
    fn test_recommend_for_customer() {
        let result = catalog().recommend_for_customer("0").unwrap();
        assert_eq!(result.purchase.item_purchased, "Coat");
        assert_eq!(
            result.recommendations,
            vec![
                Recommendation::new(
                    "Scarf",
                    "Black",
                    Some("https://img.example/scarf-black.png".to_string())
                ),
                Recommendation::new("Hat", "Red", None),
            ]
        );
    }

    #[test]
    fn test_single_item_season_yields_sentinel() {
        let result = catalog().recommend_for_customer("9").unwrap();
        assert_eq!(result.purchase.season, "Summer");
        assert_eq!(result.recommendations, vec![Recommendation::none()]);
    }

    struct LeastPopularColorFirst;

    impl PairingStrategy for LeastPopularColorFirst {
        fn pair(&self, items: &[String], colors: &[String]) -> Vec<(String, String)> {
            items
                .iter()
                .cloned()
                .zip(colors.iter().rev().cloned())
                .collect()
        }

        fn name(&self) -> &'static str {
            "least-popular-color-first"
        }
    }

    #[test]
    fn test_custom_pairing_strategy() {
        let catalog = Catalog::with_strategy(records(), Vec::new(), 3, Arc::new(LeastPopularColorFirst));
        let result = catalog.recommend_for_customer("0").unwrap();
        assert_eq!(
            result.recommendations,
            vec![
                Recommendation::new("Scarf", "Blue", None),
                Recommendation::new("Hat", "Red", None),
            ]
        );
    }

    #[test]
    fn test_blank_image_url_gets_placeholder_caption() {
        let images = crate::services::loader::read_images(
            "Item,Color,URL\nScarf,Black,\n".as_bytes(),
            std::path::Path::new("images.csv"),
        )
        .unwrap();
        let catalog = Catalog::from_parts(records(), images, 3);

        let result = catalog.recommend_for_customer("0").unwrap();
        assert_eq!(result.recommendations[0], Recommendation::new("Scarf", "Black", None));
        assert_eq!(result.recommendations[0].image_caption(), "Image not available");
    }

    #[test]
    fn test_unknown_customer() {
        assert!(catalog().recommend_for_customer("missing").is_none());
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let purchases_path = dir.path().join("purchases.csv");
        let images_path = dir.path().join("images.csv");

        let mut purchases = std::fs::File::create(&purchases_path).unwrap();
        writeln!(purchases, "Item Purchased,Color,Season").unwrap();
        writeln!(purchases, "Coat,Black,Winter").unwrap();
        writeln!(purchases, "Scarf,Red,Winter").unwrap();

        let mut images = std::fs::File::create(&images_path).unwrap();
        writeln!(images, "Item,Color,URL").unwrap();
        writeln!(images, "Scarf,Black,https://img.example/scarf-black.png").unwrap();

        let config = Config {
            purchases_path,
            images_path,
            top_n: 3,
            host: "127.0.0.1".to_string(),
            port: 0,
        };

        let first = Catalog::load(&config).unwrap();
        let second = Catalog::load(&config).unwrap();
        assert_eq!(first.records(), second.records());
        assert_eq!(first.top_items(), second.top_items());
        assert_eq!(first.top_colors(), second.top_colors());
        assert_eq!(first.images(), second.images());
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config {
            purchases_path: PathBuf::from("/nonexistent/purchases.csv"),
            images_path: PathBuf::from("/nonexistent/images.csv"),
            top_n: 3,
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        assert!(matches!(
            Catalog::load(&config),
            Err(DataLoadError::Open { .. })
        ));
    }
}
