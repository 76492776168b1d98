use std::collections::{BTreeMap, HashMap};

use crate::models::{PurchaseRecord, SeasonRanking};

/// Most purchased items per season, at most `top_n` each
pub fn top_items_by_season(records: &[PurchaseRecord], top_n: usize) -> SeasonRanking {
    rank_by_season(records, top_n, |record| &record.item_purchased)
}

/// Most purchased colors per season, at most `top_n` each
pub fn top_colors_by_season(records: &[PurchaseRecord], top_n: usize) -> SeasonRanking {
    rank_by_season(records, top_n, |record| &record.color)
}

/// Per-season frequency count of one record attribute
struct Tally<'a> {
    /// (value, count) in first-seen order
    counts: Vec<(&'a str, usize)>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn new() -> Self {
        Self {
            counts: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn add(&mut self, value: &'a str) {
        match self.positions.get(value) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.positions.insert(value, self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    /// Values by descending count; `sort_by` is stable so ties stay in first-seen order
    fn top(mut self, n: usize) -> Vec<String> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
            .into_iter()
            .take(n)
            .map(|(value, _)| value.to_string())
            .collect()
    }
}

fn rank_by_season<'a, F>(records: &'a [PurchaseRecord], top_n: usize, attribute: F) -> SeasonRanking
where
    F: Fn(&'a PurchaseRecord) -> &'a String,
{
    let mut tallies: BTreeMap<&'a str, Tally<'a>> = BTreeMap::new();

    // Blank cells are missing values, not a season or item of their own
    for record in records {
        let value = attribute(record);
        if record.season.is_empty() || value.is_empty() {
            continue;
        }
        tallies
            .entry(record.season.as_str())
            .or_insert_with(Tally::new)
            .add(value);
    }

    tracing::debug!(seasons = tallies.len(), top_n, "Ranked purchase history by season");

    SeasonRanking::new(
        tallies
            .into_iter()
            .map(|(season, tally)| (season.to_string(), tally.top(top_n)))
            .collect(),
    )
}
