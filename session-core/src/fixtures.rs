//! Stock pool and model roster supplied as JSON
//!
//! ```json
//! { "stocks": [ { "code": "SH688396", ... } ], "models": [ { "id": "ai-001", ... } ] }
//! ```
//!
//! `positions` and `decisions` are optional and default to empty.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analytics::{
    AiModel, Decision, DecisionFeed, Position, StockQuote, DECISION_FEED_CAPACITY,
};

/// Allowed gap, in percentage points, between a quote's stated and implied change
pub const CHANGE_TOLERANCE_PCT: f64 = 0.05;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fixture has no stocks")]
    NoStocks,

    #[error("Fixture has no models")]
    NoModels,

    #[error("Duplicate stock code: {0}")]
    DuplicateStock(String),

    #[error("Duplicate model id: {0}")]
    DuplicateModel(String),
}

/// Result type for fixture loading
pub type FixtureResult<T> = Result<T, FixtureError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    pub stocks: Vec<StockQuote>,
    pub models: Vec<AiModel>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

impl FixtureSet {
    pub fn from_json_str(json: &str) -> FixtureResult<Self> {
        let set: FixtureSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            stocks = set.stocks.len(),
            models = set.models.len(),
            positions = set.positions.len(),
            decisions = set.decisions.len(),
            "Loaded fixtures"
        );
        Ok(set)
    }

    /// Structural checks. Inconsistent change figures and decisions naming an
    /// unknown stock or model are only logged.
    pub fn validate(&self) -> FixtureResult<()> {
        if self.stocks.is_empty() {
            return Err(FixtureError::NoStocks);
        }
        if self.models.is_empty() {
            return Err(FixtureError::NoModels);
        }

        let mut codes = HashSet::new();
        for stock in &self.stocks {
            if !codes.insert(stock.code.as_str()) {
                return Err(FixtureError::DuplicateStock(stock.code.clone()));
            }
        }

        let mut ids = HashSet::new();
        for model in &self.models {
            if !ids.insert(model.id.as_str()) {
                return Err(FixtureError::DuplicateModel(model.id.clone()));
            }
        }

        for stock in self.inconsistent_quotes() {
            warn!(
                code = %stock.code,
                change_percent = stock.change_percent,
                implied = ?stock.implied_change_percent(),
                "Quote change figures disagree"
            );
        }

        for decision in self.orphan_decisions() {
            warn!(
                model = %decision.ai_model_id,
                stock = %decision.stock_code,
                "Decision refers to an unknown model or stock"
            );
        }

        Ok(())
    }

    pub fn inconsistent_quotes(&self) -> Vec<&StockQuote> {
        self.stocks
            .iter()
            .filter(|s| !s.is_consistent(CHANGE_TOLERANCE_PCT))
            .collect()
    }

    /// Recorded decisions as a dashboard feed, newest first.
    pub fn decision_feed(&self) -> DecisionFeed {
        DecisionFeed::from_decisions(self.decisions.iter().cloned(), DECISION_FEED_CAPACITY)
    }

    pub fn orphan_decisions(&self) -> Vec<&Decision> {
        self.decisions
            .iter()
            .filter(|d| {
                self.model(&d.ai_model_id).is_none() || self.stock(&d.stock_code).is_none()
            })
            .collect()
    }

    pub fn stock(&self, code: &str) -> Option<&StockQuote> {
        self.stocks.iter().find(|s| s.code == code)
    }

    pub fn model(&self, id: &str) -> Option<&AiModel> {
        self.models.iter().find(|m| m.id == id)
    }
}
