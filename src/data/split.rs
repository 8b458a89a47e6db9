use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::model::{Dataset, DatasetError, Split};
use crate::config::SplitConfig;

// ---------------------------------------------------------------------------
// Seeded train / holdout split
// ---------------------------------------------------------------------------

/// Number of rows reserved for the holdout: `ceil(rows * ratio)`.
pub fn holdout_size(rows: usize, test_ratio: f64) -> usize {
    (rows as f64 * test_ratio).ceil() as usize
}

/// Shuffle row indices with a seeded generator and cut off the holdout.
///
/// The same dataset and config always produce the same partition. Both
/// sides must end up non-empty.
pub fn train_test_split(dataset: &Dataset, config: &SplitConfig) -> Result<Split, DatasetError> {
    if dataset.is_empty() {
        return Err(DatasetError::Empty);
    }
    let rows = dataset.len();
    let holdout = holdout_size(rows, config.test_ratio);
    if holdout == 0 || holdout >= rows {
        return Err(DatasetError::DegenerateSplit { rows, holdout });
    }

    let mut order: Vec<usize> = (0..rows).collect();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    order.shuffle(&mut rng);

    let (test_rows, train_rows) = order.split_at(holdout);
    Ok(Split {
        train: dataset.select(train_rows),
        holdout: dataset.select(test_rows),
    })
}
