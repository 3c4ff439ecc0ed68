//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::{RankResult, RankingError};

/// How the selector chooses which pending job to advance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobOrder {
    /// Pick a random open job for every comparison
    ///
    /// Spreads the questions across items so no single item's placement is
    /// finished before the others start.
    #[default]
    Interleaved,

    /// Finish the oldest open job before starting the next one
    Sequential,
}

/// How the selector chooses the pivot inside a job's window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotPolicy {
    /// Uniformly random untried index in `[low, high)`
    #[default]
    Random,

    /// `floor((low + high) / 2)`, or the nearest untried index to it
    Midpoint,
}

impl PivotPolicy {
    /// Returns a human-readable description of this policy
    pub fn description(&self) -> &'static str {
        match self {
            Self::Random => "Random pivot inside the search window",
            Self::Midpoint => "Midpoint of the search window (strict binary search)",
        }
    }
}

/// Configuration for a [`RankingEngine`](super::engine::RankingEngine)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Selector draws per pending job before giving up
    pub retry_factor: usize,
    /// Job scheduling
    #[serde(default)]
    pub job_order: JobOrder,
    /// Pivot choice inside a job's window
    #[serde(default)]
    pub pivot_policy: PivotPolicy,
    /// Maximum number of undo steps kept (None = unbounded)
    #[serde(default)]
    pub history_limit: Option<usize>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            retry_factor: 2,
            job_order: JobOrder::Interleaved,
            pivot_policy: PivotPolicy::Random,
            history_limit: None,
        }
    }
}

impl RankingConfig {
    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> RankResult<()> {
        if self.retry_factor == 0 {
            return Err(RankingError::Configuration(
                "retry_factor must be at least 1".to_string(),
            ));
        }
        if self.history_limit == Some(0) {
            return Err(RankingError::Configuration(
                "history_limit must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> RankResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RankingError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> RankResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RankingError::Configuration(format!("Failed to serialize config: {}", e)))
    }
}
