use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the image lookup table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageEntry {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl ImageEntry {
    pub fn new(item: impl Into<String>, color: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            color: color.into(),
            url: url.into(),
        }
    }
}

/// Image URLs keyed by exact (item, color)
///
/// Built once from the lookup table. When the table repeats a pair, the last row wins.
/// A blank URL means no image, so a blank row also clears an earlier URL for its pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageIndex {
    urls: HashMap<(String, String), String>,
}

impl ImageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ImageEntry) {
        let key = (entry.item, entry.color);
        if entry.url.trim().is_empty() {
            self.urls.remove(&key);
        } else {
            self.urls.insert(key, entry.url);
        }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, item: &str, color: &str) -> Option<&str> {
        self.urls
            .get(&(item.to_string(), color.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl FromIterator<ImageEntry> for ImageIndex {
    fn from_iter<I: IntoIterator<Item = ImageEntry>>(iter: I) -> Self {
        let mut index = ImageIndex::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}
