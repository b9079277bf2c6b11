use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::types::{AiModel, ModelStatus};

/// Roster-wide headline figures
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaSummary {
    pub model_count: usize,
    pub active_count: usize,
    /// Mean total return, percent
    pub average_return: f64,
    pub best_model_id: String,
    pub best_model_name: String,
    pub total_positions: u32,
}

/// Leaderboard ordering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    TotalReturn,
    SharpeRatio,
    WinRate,
    /// Shallowest drawdown first
    MaxDrawdown,
}

impl RankBy {
    fn metric(&self, model: &AiModel) -> f64 {
        match self {
            RankBy::TotalReturn => model.total_return,
            RankBy::SharpeRatio => model.sharpe_ratio,
            RankBy::WinRate => model.win_rate,
            // Drawdowns are non-positive; closer to zero ranks higher
            RankBy::MaxDrawdown => model.max_drawdown,
        }
    }

    fn best_first(&self, a: &AiModel, b: &AiModel) -> Ordering {
        self.metric(b).total_cmp(&self.metric(a))
    }
}

pub fn arena_summary(models: &[AiModel]) -> Option<ArenaSummary> {
    // First model wins ties
    let best = models.iter().reduce(|best, m| {
        if m.total_return > best.total_return {
            m
        } else {
            best
        }
    })?;

    let model_count = models.len();
    let average_return = models.iter().map(|m| m.total_return).sum::<f64>() / model_count as f64;

    Some(ArenaSummary {
        model_count,
        active_count: models
            .iter()
            .filter(|m| m.status == ModelStatus::Active)
            .count(),
        average_return,
        best_model_id: best.id.clone(),
        best_model_name: best.name.clone(),
        total_positions: models.iter().map(|m| m.position_count).sum(),
    })
}

/// Models ordered best-first; ties keep roster order.
pub fn leaderboard(models: &[AiModel], rank_by: RankBy) -> Vec<&AiModel> {
    let mut ranked: Vec<&AiModel> = models.iter().collect();
    ranked.sort_by(|a, b| rank_by.best_first(a, b));
    ranked
}
