//! Open positions and their profit and loss

use serde::{Deserialize, Serialize};

/// One open position, marked at `current_price`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: u32,
    pub entry_price: f64,
    pub current_price: f64,
}

impl Position {
    /// Unrealized P&L in price currency.
    pub fn pnl(&self) -> f64 {
        (self.current_price - self.entry_price) * self.quantity as f64
    }

    /// Move since entry, percent. `None` without a positive entry price.
    pub fn pnl_percent(&self) -> Option<f64> {
        if self.entry_price > 0.0 {
            Some((self.current_price - self.entry_price) / self.entry_price * 100.0)
        } else {
            None
        }
    }

    pub fn market_value(&self) -> f64 {
        self.current_price * self.quantity as f64
    }
}

/// Totals shown above the positions list
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionsSummary {
    pub position_count: usize,
    pub total_pnl: f64,
    pub total_value: f64,
}

impl PositionsSummary {
    /// Break-even counts as profitable.
    pub fn is_profitable(&self) -> bool {
        self.total_pnl >= 0.0
    }
}

pub fn positions_summary(positions: &[Position]) -> PositionsSummary {
    PositionsSummary {
        position_count: positions.len(),
        total_pnl: positions.iter().map(Position::pnl).sum(),
        total_value: positions.iter().map(Position::market_value).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(symbol: &str, quantity: u32, entry_price: f64, current_price: f64) -> Position {
        Position {
            symbol: symbol.to_string(),
            quantity,
            entry_price,
            current_price,
        }
    }

    #[test]
    fn test_position_pnl() {
        let long = position("AAPL", 50, 178.25, 182.40);
        assert!((long.pnl() - 207.5).abs() < 1e-9);
        assert!((long.pnl_percent().unwrap() - 2.328).abs() < 1e-3);
        assert!((long.market_value() - 9120.0).abs() < 1e-9);

        let losing = position("TSLA", 25, 242.80, 238.15);
        assert!((losing.pnl() - (-116.25)).abs() < 1e-9);
        assert!(losing.pnl_percent().unwrap() < 0.0);
    }

    #[test]
    fn test_zero_entry_price_has_no_percent() {
        let gifted = position("FREE", 10, 0.0, 5.0);
        assert_eq!(gifted.pnl_percent(), None);
        assert!((gifted.pnl() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_totals() {
        let positions = vec![
            position("AAPL", 50, 178.25, 182.40),
            position("TSLA", 25, 242.80, 238.15),
        ];
        let summary = positions_summary(&positions);

        assert_eq!(summary.position_count, 2);
        assert!((summary.total_pnl - 91.25).abs() < 1e-9);
        assert!((summary.total_value - (9120.0 + 5953.75)).abs() < 1e-9);
        assert!(summary.is_profitable());

        let underwater = positions_summary(&positions[1..]);
        assert!(!underwater.is_profitable());
    }

    #[test]
    fn test_empty_summary() {
        let summary = positions_summary(&[]);
        assert_eq!(summary, PositionsSummary::default());
        assert!(summary.is_profitable());
    }
}
