use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::WorkflowConfig;
use crate::data::loader::{BundledSample, DatasetSource};
use crate::data::model::Split;
use crate::data::split::train_test_split;
use crate::forest::{accuracy, Accuracy, RandomForest};

// ---------------------------------------------------------------------------
// Errors surfaced to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("loading the dataset failed")]
    LoadFailed(#[source] anyhow::Error),
    #[error("detection failed")]
    DetectFailed(#[source] anyhow::Error),
    #[error("no dataset loaded")]
    NoDatasetLoaded,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Idle → Ready (load) → Evaluated (detect). Load is accepted from any
/// state; detect is accepted from Ready and Evaluated.
#[derive(Debug, Clone, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Ready {
        split: Split,
    },
    Evaluated {
        split: Split,
    },
}

impl WorkflowState {
    pub fn split(&self) -> Option<&Split> {
        match self {
            WorkflowState::Idle => None,
            WorkflowState::Ready { split } | WorkflowState::Evaluated { split } => Some(split),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.split().is_some()
    }
}

/// Sizes reported back after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loaded {
    pub train: usize,
    pub holdout: usize,
}

// ---------------------------------------------------------------------------
// Pure steps
// ---------------------------------------------------------------------------

/// Load the dataset from `source` and partition it.
pub fn prepare_split(source: &dyn DatasetSource, config: &WorkflowConfig) -> Result<Split> {
    config.validate().context("invalid workflow configuration")?;
    debug!(
        "Workflow config: {}",
        serde_json::to_string(config).unwrap_or_default()
    );
    let dataset = source
        .load()
        .with_context(|| format!("loading {}", source.name()))?;
    info!(
        "Loaded {}: {} rows x {} features",
        source.name(),
        dataset.len(),
        dataset.n_features()
    );
    let split = train_test_split(&dataset, &config.split).context("splitting dataset")?;
    Ok(split)
}

/// Fit a fresh forest on the training side and score it on the holdout.
pub fn evaluate(split: &Split, config: &WorkflowConfig) -> Result<Accuracy> {
    let forest = RandomForest::fit(
        split.train.features(),
        split.train.labels(),
        &config.forest,
    )
    .context("fitting random forest")?;
    let predicted = forest
        .predict(split.holdout.features())
        .context("predicting holdout labels")?;
    let acc = accuracy(split.holdout.labels(), predicted.view()).context("scoring holdout")?;
    info!(
        "Fitted {} trees on {} rows, holdout accuracy {acc}",
        forest.n_trees(),
        split.train_len()
    );
    Ok(acc)
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the workflow state and applies transitions. Every operation either
/// succeeds and moves to the next state, or fails and leaves it untouched.
pub struct Workflow {
    config: WorkflowConfig,
    source: Box<dyn DatasetSource>,
    state: WorkflowState,
    /// Path picked for the last successful load. Recorded only.
    selection: Option<PathBuf>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(WorkflowConfig::default(), Box::new(BundledSample))
    }
}

impl Workflow {
    pub fn new(config: WorkflowConfig, source: Box<dyn DatasetSource>) -> Self {
        Self {
            config,
            source,
            state: WorkflowState::Idle,
            selection: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    /// Load the dataset. `selection` is the file the user picked; its
    /// contents are never read.
    pub fn load(&mut self, selection: &Path) -> Result<Loaded, WorkflowError> {
        warn!(
            "Selected file {} is not read; using the {}",
            selection.display(),
            self.source.name()
        );
        match prepare_split(self.source.as_ref(), &self.config) {
            Ok(split) => {
                let loaded = Loaded {
                    train: split.train_len(),
                    holdout: split.holdout_len(),
                };
                info!(
                    "Split into {} training and {} holdout rows",
                    loaded.train, loaded.holdout
                );
                self.state = WorkflowState::Ready { split };
                self.selection = Some(selection.to_path_buf());
                Ok(loaded)
            }
            Err(e) => {
                error!("Failed to load dataset: {e:#}");
                Err(WorkflowError::LoadFailed(e))
            }
        }
    }

    /// Re-fit and score. Requires a loaded dataset.
    pub fn detect(&mut self) -> Result<Accuracy, WorkflowError> {
        let Some(split) = self.state.split() else {
            warn!("Detect requested before a dataset was loaded");
            return Err(WorkflowError::NoDatasetLoaded);
        };

        match evaluate(split, &self.config) {
            Ok(accuracy) => {
                let split = split.clone();
                self.state = WorkflowState::Evaluated { split };
                Ok(accuracy)
            }
            Err(e) => {
                error!("Detection failed: {e:#}");
                Err(WorkflowError::DetectFailed(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Report: outcome → user-facing notice
// ---------------------------------------------------------------------------

/// Title and message shown in the modal notice window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Render a detection result.
pub fn report(accuracy: Accuracy) -> Notice {
    Notice::new(
        "Result",
        format!("Breast Cancer Detection Accuracy: {accuracy}"),
    )
}

/// Render a failed operation.
pub fn report_error(err: &WorkflowError) -> Notice {
    let message = match err {
        WorkflowError::LoadFailed(_) => "An error occurred while loading the dataset.",
        WorkflowError::DetectFailed(_) => "An error occurred while detecting breast cancer.",
        WorkflowError::NoDatasetLoaded => "Please load a dataset before trying to detect cancer.",
    };
    Notice::new("Error", message)
}
