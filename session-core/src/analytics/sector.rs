use serde::{Deserialize, Serialize};

use super::types::{Sector, StockQuote};

/// Number of leaders reported per sector
pub const SECTOR_LEADERS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub sector: Sector,
    pub stock_count: usize,
    /// Mean of member `change_percent`
    pub avg_change_percent: f64,
    pub total_volume: u64,
    /// Best performers first
    pub leaders: Vec<StockQuote>,
}

/// Up / down / flat counts across the pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketBreadth {
    pub advancers: usize,
    pub decliners: usize,
    pub unchanged: usize,
}

pub fn stocks_in_sector(stocks: &[StockQuote], sector: Sector) -> Vec<&StockQuote> {
    stocks.iter().filter(|s| s.sector == sector).collect()
}

pub fn summarize_sector(stocks: &[StockQuote], sector: Sector) -> Option<SectorSummary> {
    let members = stocks_in_sector(stocks, sector);
    if members.is_empty() {
        return None;
    }

    let stock_count = members.len();
    let avg_change_percent =
        members.iter().map(|s| s.change_percent).sum::<f64>() / stock_count as f64;
    let total_volume = members.iter().map(|s| s.volume).sum();

    let mut ranked = members;
    ranked.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
    let leaders = ranked
        .into_iter()
        .take(SECTOR_LEADERS)
        .cloned()
        .collect();

    Some(SectorSummary {
        sector,
        stock_count,
        avg_change_percent,
        total_volume,
        leaders,
    })
}

/// One summary per populated sector, in canonical sector order.
pub fn sector_rotation(stocks: &[StockQuote]) -> Vec<SectorSummary> {
    Sector::ALL
        .iter()
        .filter_map(|&sector| summarize_sector(stocks, sector))
        .collect()
}

pub fn market_breadth(stocks: &[StockQuote]) -> MarketBreadth {
    stocks.iter().fold(MarketBreadth::default(), |mut acc, s| {
        if s.is_advancing() {
            acc.advancers += 1;
        } else if s.is_declining() {
            acc.decliners += 1;
        } else {
            acc.unchanged += 1;
        }
        acc
    })
}

/// Code matches case-insensitively by substring; name by plain substring.
/// An empty query returns the whole pool.
pub fn search_stocks<'a>(stocks: &'a [StockQuote], query: &str) -> Vec<&'a StockQuote> {
    let query = query.trim();
    if query.is_empty() {
        return stocks.iter().collect();
    }

    let needle = query.to_lowercase();
    stocks
        .iter()
        .filter(|s| s.code.to_lowercase().contains(&needle) || s.name.contains(query))
        .collect()
}
