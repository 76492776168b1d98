use crate::models::{ImageEntry, ImageIndex};

/// Builds the (item, color) lookup; repeated pairs keep the last row seen, blank URLs are absent
pub fn build_index(entries: Vec<ImageEntry>) -> ImageIndex {
    let rows = entries.len();
    let index: ImageIndex = entries.into_iter().collect();

    if index.len() < rows {
        tracing::debug!(
            rows,
            unique = index.len(),
            "Image table has repeated pairs or blank URLs"
        );
    }

    index
}

/// Image URL for an exact (item, color) pair, if the lookup table has one
pub fn resolve_image(index: &ImageIndex, item: &str, color: &str) -> Option<String> {
    index.get(item, color).map(str::to_string)
}
