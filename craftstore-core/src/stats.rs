//! Sales statistics computed by the shop API
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub count: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub id: u32,
    pub name: String,
    pub emoji: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// ISO date, e.g. `2025-03-14`
    pub day: String,
    pub count: u64,
    pub revenue: u64,
}

/// Aggregate admin dashboard figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub today: PeriodTotals,
    pub total: PeriodTotals,
    pub unique_players: u64,
    pub active_promos: u64,
    pub top_items: Vec<TopItem>,
    pub daily: Vec<DailyPoint>,
}

impl Stats {
    /// Bar widths for the top-items ranking as a percent of the best seller.
    #[must_use]
    pub fn top_item_bars(&self) -> Vec<(&TopItem, u8)> {
        let max = self.top_items.iter().map(|t| t.count).max().unwrap_or(0);
        self.top_items
            .iter()
            .map(|item| (item, percent_of(item.count, max)))
            .collect()
    }
}

/// `value` as an integer percent of `max`, truncated; 0 when `max` is 0.
#[must_use]
pub fn percent_of(value: u64, max: u64) -> u8 {
    if max == 0 {
        return 0;
    }
    let pct = u128::from(value.min(max)) * 100 / u128::from(max);
    u8::try_from(pct).unwrap_or(100)
}
