use serde::Serialize;

/// Item shown by the sentinel recommendation
pub const NO_RECOMMENDATION: &str = "No recommendation";

/// Color shown by the sentinel recommendation
pub const NO_COLOR: &str = "No color";

/// Caption shown in place of a missing image
pub const IMAGE_NOT_AVAILABLE: &str = "Image not available";

/// A recommended (item, color) pair with its image, if one is known
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub item: String,
    pub color: String,
    pub image_url: Option<String>,
}

impl Recommendation {
    pub fn new(item: impl Into<String>, color: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            item: item.into(),
            color: color.into(),
            image_url,
        }
    }

    /// Placeholder returned when nothing can be recommended
    pub fn none() -> Self {
        Self::new(NO_RECOMMENDATION, NO_COLOR, None)
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    /// Display label, e.g. "Scarf in Red"
    pub fn label(&self) -> String {
        format!("{} in {}", self.item, self.color)
    }

    pub fn image_caption(&self) -> String {
        match self.image_url {
            Some(_) => self.label(),
            None => IMAGE_NOT_AVAILABLE.to_string(),
        }
    }
}
