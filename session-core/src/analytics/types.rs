//! Stock pool and model roster records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sector of the stock pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Semiconductor,
    Solar,
    Tech,
}

impl Sector {
    /// Canonical display order
    pub const ALL: [Sector; 3] = [Sector::Semiconductor, Sector::Solar, Sector::Tech];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Semiconductor => "semiconductor",
            Sector::Solar => "solar",
            Sector::Tech => "tech",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quote of the stock pool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub code: String,
    pub name: String,
    pub sector: Sector,
    /// Finer-grained industry label
    pub sector_name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    /// Turnover rate, percent
    pub turnover: f64,
    /// 0-100
    pub ai_attention: u8,
}

impl StockQuote {
    pub fn prior_price(&self) -> f64 {
        self.price - self.change
    }

    /// Percentage change implied by price and absolute change.
    pub fn implied_change_percent(&self) -> Option<f64> {
        let prior = self.prior_price();
        if prior > 0.0 {
            Some(self.change / prior * 100.0)
        } else {
            None
        }
    }

    /// True when `change_percent` agrees with `price` and `change` within
    /// `tolerance` percentage points.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        self.implied_change_percent()
            .map(|implied| (implied - self.change_percent).abs() <= tolerance)
            .unwrap_or(false)
    }

    pub fn is_advancing(&self) -> bool {
        self.change_percent > 0.0
    }

    pub fn is_declining(&self) -> bool {
        self.change_percent < 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Idle,
    Deciding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub base_model: String,
    pub signature: String,
    pub risk_level: RiskLevel,
}

/// Competitor in the arena
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModel {
    pub id: String,
    pub name: String,
    /// Percent
    pub total_return: f64,
    pub sharpe_ratio: f64,
    /// Percent, zero or negative
    pub max_drawdown: f64,
    /// Percent
    pub win_rate: f64,
    pub position_count: u32,
    pub status: ModelStatus,
    pub config: ModelConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote(price: f64, change: f64, change_percent: f64) -> StockQuote {
        StockQuote {
            code: "SH688396".to_string(),
            name: "CR Micro".to_string(),
            sector: Sector::Semiconductor,
            sector_name: "Semiconductors".to_string(),
            price,
            change,
            change_percent,
            volume: 8_523_400,
            turnover: 4.52,
            ai_attention: 85,
        }
    }

    #[test]
    fn test_change_consistency() {
        let q = quote(52.30, 1.85, 3.67);
        assert!((q.prior_price() - 50.45).abs() < 1e-9);
        assert!(q.is_consistent(0.01));

        let bad = quote(52.30, 1.85, 5.00);
        assert!(!bad.is_consistent(0.01));

        let zero_prior = quote(1.0, 1.0, 100.0);
        assert_eq!(zero_prior.implied_change_percent(), None);
        assert!(!zero_prior.is_consistent(1.0));
    }

    #[test]
    fn test_deserialize_camel_case_and_ignore_presentation() {
        let model: AiModel = serde_json::from_value(json!({
            "id": "ai-003",
            "name": "Gamma",
            "color": "#8B5CF6",
            "totalReturn": 15.43,
            "sharpeRatio": 2.12,
            "maxDrawdown": -5.67,
            "winRate": 72.8,
            "positionCount": 4,
            "status": "idle",
            "config": {
                "baseModel": "Gemini-Pro",
                "signature": "ConservativeGuard-V1",
                "riskLevel": "low"
            }
        }))
        .unwrap();

        assert_eq!(model.status, ModelStatus::Idle);
        assert_eq!(model.config.risk_level, RiskLevel::Low);
        assert_eq!(model.position_count, 4);
    }

    #[test]
    fn test_sector_order() {
        assert_eq!(
            Sector::ALL.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            vec!["semiconductor", "solar", "tech"]
        );
        let parsed: Sector = serde_json::from_str("\"solar\"").unwrap();
        assert_eq!(parsed, Sector::Solar);
    }
}
