pub mod aggregator;
pub mod catalog;
pub mod images;
pub mod loader;
pub mod selector;

pub use aggregator::{top_colors_by_season, top_items_by_season};
pub use catalog::Catalog;
pub use images::{build_index, resolve_image};
pub use loader::{load_images, load_purchases};
pub use selector::{recommend, PairingStrategy, PositionalPairing, Recommender, MAX_RECOMMENDATIONS};
