use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forest::ForestConfig;

// ---------------------------------------------------------------------------
// Workflow configuration
// ---------------------------------------------------------------------------

/// Seed used by both the train/holdout split and the forest.
pub const DEFAULT_SEED: u64 = 42;

/// Everything that makes a load → detect run reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub split: SplitConfig,
    pub forest: ForestConfig,
}

/// Train/holdout partition parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of rows held out for scoring, in (0, 1).
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("test ratio must lie strictly between 0 and 1, got {0}")]
    TestRatio(f64),
    #[error("forest needs at least one tree")]
    NoTrees,
    #[error("min_samples_split must be at least 2, got {0}")]
    MinSamplesSplit(usize),
    #[error("min_samples_leaf must be at least 1")]
    MinSamplesLeaf,
}

impl WorkflowConfig {
    /// Reject parameter combinations that cannot produce a valid run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.split.test_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(ConfigError::TestRatio(ratio));
        }
        self.forest.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_seeds() {
        let cfg = WorkflowConfig::default();
        assert_eq!(cfg.split.seed, 42);
        assert_eq!(cfg.forest.seed, 42);
        assert_eq!(cfg.split.test_ratio, 0.2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        for ratio in [0.0, 1.0, -0.5, f64::NAN] {
            let mut cfg = WorkflowConfig::default();
            cfg.split.test_ratio = ratio;
            assert!(matches!(cfg.validate(), Err(ConfigError::TestRatio(_))));
        }
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: WorkflowConfig =
            serde_json::from_str(r#"{ "forest": { "n_trees": 10, "max_features": "Log2" } }"#)
                .unwrap();
        assert_eq!(cfg.forest.n_trees, 10);
        assert_eq!(cfg.forest.max_features, crate::forest::MaxFeatures::Log2);
        assert_eq!(cfg.forest.seed, DEFAULT_SEED);
        assert_eq!(cfg.split, SplitConfig::default());
    }

    #[test]
    fn rejects_empty_forest() {
        let mut cfg = WorkflowConfig::default();
        cfg.forest.n_trees = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::NoTrees));
    }
}
