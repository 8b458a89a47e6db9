use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DatasetError – shape and content problems found while building a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,
    #[error("expected {rows} x {cols} feature values, got {found}")]
    Shape {
        rows: usize,
        cols: usize,
        found: usize,
    },
    #[error("{labels} labels for {rows} rows")]
    LabelCount { rows: usize, labels: usize },
    #[error("row {row}: label {label} is not binary")]
    NonBinaryLabel { row: usize, label: usize },
    #[error("row {row}, column {col}: feature is not finite")]
    NonFinite { row: usize, col: usize },
    #[error("cannot hold out {holdout} of {rows} rows")]
    DegenerateSplit { rows: usize, holdout: usize },
}

// ---------------------------------------------------------------------------
// Dataset – the full labelled feature matrix
// ---------------------------------------------------------------------------

/// Feature matrix (rows × columns) with one binary label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<usize>,
}

impl Dataset {
    /// Build a dataset from row-major feature values.
    pub fn from_row_major(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
        labels: Vec<usize>,
    ) -> Result<Self, DatasetError> {
        if rows == 0 || cols == 0 {
            return Err(DatasetError::Empty);
        }
        if values.len() != rows * cols {
            return Err(DatasetError::Shape {
                rows,
                cols,
                found: values.len(),
            });
        }
        if labels.len() != rows {
            return Err(DatasetError::LabelCount {
                rows,
                labels: labels.len(),
            });
        }
        if let Some((row, &label)) = labels.iter().enumerate().find(|(_, &l)| l > 1) {
            return Err(DatasetError::NonBinaryLabel { row, label });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DatasetError::NonFinite {
                row: pos / cols,
                col: pos % cols,
            });
        }

        let features = Array2::from_shape_vec((rows, cols), values).map_err(|_| {
            DatasetError::Shape {
                rows,
                cols,
                found: rows * cols,
            }
        })?;

        Ok(Self {
            features,
            labels: Array1::from(labels),
        })
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Copy out the given rows, in order.
    pub fn select(&self, rows: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), rows),
            labels: self.labels.select(Axis(0), rows),
        }
    }
}

// ---------------------------------------------------------------------------
// Split – train / holdout partition produced at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub holdout: Dataset,
}

impl Split {
    pub fn train_len(&self) -> usize {
        self.train.len()
    }

    pub fn holdout_len(&self) -> usize {
        self.holdout.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_row_major_matrix() {
        let ds = Dataset::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![0, 1])
            .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.n_features(), 3);
        assert_eq!(ds.features()[[1, 0]], 4.0);
        assert_eq!(ds.labels()[1], 1);
    }

    #[test]
    fn rejects_bad_shapes_and_labels() {
        assert_eq!(
            Dataset::from_row_major(0, 3, vec![], vec![]).unwrap_err(),
            DatasetError::Empty
        );
        assert!(matches!(
            Dataset::from_row_major(2, 2, vec![1.0; 3], vec![0, 1]),
            Err(DatasetError::Shape { found: 3, .. })
        ));
        assert!(matches!(
            Dataset::from_row_major(2, 1, vec![1.0, 2.0], vec![0]),
            Err(DatasetError::LabelCount { rows: 2, labels: 1 })
        ));
        assert!(matches!(
            Dataset::from_row_major(2, 1, vec![1.0, 2.0], vec![0, 2]),
            Err(DatasetError::NonBinaryLabel { row: 1, label: 2 })
        ));
        assert!(matches!(
            Dataset::from_row_major(2, 2, vec![1.0, 2.0, f64::NAN, 4.0], vec![0, 1]),
            Err(DatasetError::NonFinite { row: 1, col: 0 })
        ));
    }

    #[test]
    fn select_keeps_row_order() {
        let ds = Dataset::from_row_major(3, 1, vec![10.0, 20.0, 30.0], vec![0, 1, 0]).unwrap();
        let picked = ds.select(&[2, 0]);
        assert_eq!(picked.features().column(0).to_vec(), vec![30.0, 10.0]);
        assert_eq!(picked.labels().to_vec(), vec![0, 0]);
    }
}
