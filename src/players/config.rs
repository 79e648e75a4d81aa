use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::players::value::{ValueFnKind, ValueFunctionParams};
use crate::trading::ProposalHeuristic;

pub const DEFAULT_HEURISTICS: [ProposalHeuristic; 4] = [
    ProposalHeuristic::MostForLeast,
    ProposalHeuristic::PortResource,
    ProposalHeuristic::RoadPriority,
    ProposalHeuristic::CityPriority,
];

/// Everything that distinguishes one trading agent from another. Built once,
/// then handed to every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub heuristics: Vec<ProposalHeuristic>,
    /// Probability of returning a uniformly random candidate instead of valuing.
    pub epsilon: Option<f64>,
    pub value_fn: ValueFnKind,
    /// Overrides the weights of `value_fn` when set.
    pub params: Option<ValueFunctionParams>,
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            heuristics: DEFAULT_HEURISTICS.to_vec(),
            epsilon: None,
            value_fn: ValueFnKind::Base,
            params: None,
            seed: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read agent config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed agent config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("epsilon must lie within [0, 1], got {0}")]
    Epsilon(f64),
    #[error("heuristic {0} listed more than once")]
    DuplicateHeuristic(ProposalHeuristic),
}

impl AgentConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(epsilon) = self.epsilon {
            if !(0.0..=1.0).contains(&epsilon) {
                return Err(ConfigError::Epsilon(epsilon));
            }
        }
        let mut seen = HashSet::new();
        for heuristic in &self.heuristics {
            if !seen.insert(*heuristic) {
                return Err(ConfigError::DuplicateHeuristic(*heuristic));
            }
        }
        Ok(())
    }

    pub fn value_params(&self) -> ValueFunctionParams {
        self.params
            .clone()
            .unwrap_or_else(|| self.value_fn.default_params())
    }
}
