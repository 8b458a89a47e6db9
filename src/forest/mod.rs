/// Random-forest classifier: bagged CART trees with majority voting.
///
/// ```text
///   seed ──► master rng ──► per-tree seed ──► bootstrap rows ──► DecisionTree
///                                                                   │
///   feature row ──────────────────────────────► vote of all trees ◄─┘
/// ```
pub mod metrics;
pub mod tree;

use log::debug;
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, DEFAULT_SEED};
pub use metrics::{accuracy, Accuracy};
use tree::{majority_class, DecisionTree, TreeParams};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForestError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("no rows to score")]
    EmptyInput,
    #[error("expected {expected} entries, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("model was fitted on {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How many candidate features each split looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`
    Sqrt,
    /// `floor(log2(n_features))`
    Log2,
    All,
    Count(usize),
}

impl MaxFeatures {
    /// Resolve against the actual feature count; never below one.
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => k.min(n_features),
        };
        k.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// `None` grows every tree until its leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    /// Draw each tree's rows with replacement; otherwise use all rows.
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trees == 0 {
            return Err(ConfigError::NoTrees);
        }
        if self.min_samples_split < 2 {
            return Err(ConfigError::MinSamplesSplit(self.min_samples_split));
        }
        if self.min_samples_leaf == 0 {
            return Err(ConfigError::MinSamplesLeaf);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RandomForest
// ---------------------------------------------------------------------------

/// An ensemble of decision trees fitted on bootstrap samples.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    /// Fit a forest on `x` (rows × features) and labels `y`.
    ///
    /// Trees are grown one after another. Each tree gets its own generator
    /// seeded from a master generator, so the whole forest is a pure
    /// function of the data and `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::Config`] for an invalid configuration,
    /// [`ForestError::EmptyTrainingSet`] when there are no rows, and
    /// [`ForestError::LengthMismatch`] when `y` does not have one label per row.
    pub fn fit(
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        config: &ForestConfig,
    ) -> Result<Self, ForestError> {
        config.validate()?;
        let n = x.nrows();
        if n == 0 || x.ncols() == 0 {
            return Err(ForestError::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(ForestError::LengthMismatch {
                expected: n,
                found: y.len(),
            });
        }

        let n_classes = y.iter().copied().max().map_or(1, |m| m + 1);
        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
            max_features: config.max_features.resolve(x.ncols()),
            n_classes,
        };

        let mut master = Xoshiro256PlusPlus::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        for i in 0..config.n_trees {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(master.random::<u64>());
            let samples: Vec<usize> = if config.bootstrap {
                (0..n).map(|_| rng.random_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            let tree = DecisionTree::fit(x, y, samples, &params, &mut rng);
            debug!(
                "tree {i}: {} nodes, {} leaves, depth {}",
                tree.node_count(),
                tree.leaf_count(),
                tree.depth()
            );
            trees.push(tree);
        }

        Ok(Self {
            trees,
            n_features: x.ncols(),
            n_classes,
        })
    }

    /// Majority vote of all trees for every row of `x`.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<usize>, ForestError> {
        if x.ncols() != self.n_features {
            return Err(ForestError::FeatureMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }
        let mut votes = vec![0usize; self.n_classes];
        let predictions = x
            .rows()
            .into_iter()
            .map(|row| {
                votes.iter_mut().for_each(|v| *v = 0);
                for tree in &self.trees {
                    votes[tree.predict_row(row)] += 1;
                }
                majority_class(&votes)
            })
            .collect();
        Ok(predictions)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn blobs() -> (Array2<f64>, Array1<usize>) {
        let x = array![
            [1.0, 1.2],
            [1.5, 0.8],
            [0.7, 1.1],
            [1.1, 0.6],
            [8.0, 8.4],
            [7.6, 8.1],
            [8.3, 7.7],
            [7.9, 8.8],
        ];
        let y = array![0, 0, 0, 0, 1, 1, 1, 1];
        (x, y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn classifies_separable_blobs() {
        let (x, y) = blobs();
        let forest = RandomForest::fit(x.view(), y.view(), &small_config()).unwrap();
        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.predict(x.view()).unwrap(), y);

        let queries = array![[0.9, 0.9], [8.1, 8.0]];
        assert_eq!(forest.predict(queries.view()).unwrap(), array![0, 1]);
    }

    #[test]
    fn same_seed_same_predictions() {
        let (x, y) = blobs();
        let queries = array![[4.0, 4.0], [4.6, 4.5], [3.9, 5.1]];
        let a = RandomForest::fit(x.view(), y.view(), &small_config()).unwrap();
        let b = RandomForest::fit(x.view(), y.view(), &small_config()).unwrap();
        assert_eq!(
            a.predict(queries.view()).unwrap(),
            b.predict(queries.view()).unwrap()
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let (x, y) = blobs();
        let empty = Array2::<f64>::zeros((0, 2));
        let no_labels = Array1::<usize>::zeros(0);
        assert_eq!(
            RandomForest::fit(empty.view(), no_labels.view(), &small_config()).unwrap_err(),
            ForestError::EmptyTrainingSet
        );
        assert!(matches!(
            RandomForest::fit(x.view(), y.slice(ndarray::s![..3]), &small_config()),
            Err(ForestError::LengthMismatch { expected: 8, found: 3 })
        ));

        let zero_trees = ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        };
        assert_eq!(
            RandomForest::fit(x.view(), y.view(), &zero_trees).unwrap_err(),
            ForestError::Config(ConfigError::NoTrees)
        );

        let forest = RandomForest::fit(x.view(), y.view(), &small_config()).unwrap();
        assert!(matches!(
            forest.predict(array![[1.0, 2.0, 3.0]].view()),
            Err(ForestError::FeatureMismatch { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn max_features_resolution() {
        assert_eq!(MaxFeatures::Sqrt.resolve(30), 5);
        assert_eq!(MaxFeatures::Log2.resolve(30), 4);
        assert_eq!(MaxFeatures::All.resolve(30), 30);
        assert_eq!(MaxFeatures::Count(50).resolve(30), 30);
        assert_eq!(MaxFeatures::Count(0).resolve(30), 1);
        assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
    }
}
