use serde::Serialize;

/// One row of the purchase history table
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// `Customer ID` column when present, otherwise the zero-based row position
    pub customer_id: String,
    pub item_purchased: String,
    pub color: String,
    pub season: String,
}

impl PurchaseRecord {
    pub fn new(
        customer_id: impl Into<String>,
        item_purchased: impl Into<String>,
        color: impl Into<String>,
        season: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            item_purchased: item_purchased.into(),
            color: color.into(),
            season: season.into(),
        }
    }

    /// The query context used to recommend follow-up purchases for this record
    pub fn to_query(&self) -> PurchaseQuery {
        PurchaseQuery {
            season: self.season.clone(),
            item_purchased: self.item_purchased.clone(),
            color: self.color.clone(),
        }
    }
}

/// Season/item/color context supplied by the presentation layer for a single query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseQuery {
    pub season: String,
    pub item_purchased: String,
    pub color: String,
}
