use anyhow::{ensure, Context, Result};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Dataset sources
// ---------------------------------------------------------------------------

/// Anything that can hand the workflow a labelled dataset.
pub trait DatasetSource {
    /// Short human-readable name for logs.
    fn name(&self) -> &str;

    fn load(&self) -> Result<Dataset>;
}

/// The Wisconsin diagnostic breast cancer sample compiled into the binary.
///
/// 569 rows, 30 real-valued features, label 0 = malignant, 1 = benign.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSample;

/// Row count of the bundled sample.
pub const SAMPLE_ROWS: usize = 569;
/// Feature count of the bundled sample.
pub const SAMPLE_FEATURES: usize = 30;

impl DatasetSource for BundledSample {
    fn name(&self) -> &str {
        "bundled breast cancer sample"
    }

    fn load(&self) -> Result<Dataset> {
        let raw = smartcore::dataset::breast_cancer::load_dataset();
        ensure!(
            raw.num_samples == SAMPLE_ROWS && raw.num_features == SAMPLE_FEATURES,
            "bundled sample is {} x {}, expected {SAMPLE_ROWS} x {SAMPLE_FEATURES}",
            raw.num_samples,
            raw.num_features
        );

        let values: Vec<f64> = raw.data.iter().map(|&v| v as f64).collect();
        let labels: Vec<usize> = raw.target.iter().map(|&t| t as usize).collect();

        Dataset::from_row_major(raw.num_samples, raw.num_features, values, labels)
            .context("decoding bundled breast cancer sample")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sample_has_expected_shape() {
        let ds = BundledSample.load().unwrap();
        assert_eq!(ds.len(), SAMPLE_ROWS);
        assert_eq!(ds.n_features(), SAMPLE_FEATURES);

        let positives = ds.labels().iter().filter(|&&l| l == 1).count();
        assert!(positives > 0 && positives < SAMPLE_ROWS);
    }
}
