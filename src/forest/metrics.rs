use std::fmt;

use ndarray::ArrayView1;

use super::ForestError;

/// Fraction of holdout rows whose predicted label matches the truth.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Accuracy(f64);

impl Accuracy {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Always two decimal digits, e.g. `0.96`.
impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub fn accuracy(
    truth: ArrayView1<usize>,
    predicted: ArrayView1<usize>,
) -> Result<Accuracy, ForestError> {
    if truth.len() != predicted.len() {
        return Err(ForestError::LengthMismatch {
            expected: truth.len(),
            found: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(ForestError::EmptyInput);
    }
    let hits = truth
        .iter()
        .zip(predicted.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(Accuracy(hits as f64 / truth.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn counts_matching_labels() {
        let acc = accuracy(array![0, 1, 1, 0].view(), array![0, 1, 0, 0].view()).unwrap();
        assert_relative_eq!(acc.value(), 0.75);
        assert_eq!(acc.to_string(), "0.75");
    }

    #[test]
    fn formats_with_two_decimals() {
        let acc = accuracy(array![1, 1, 1].view(), array![1, 1, 1].view()).unwrap();
        assert_eq!(acc.to_string(), "1.00");
        let acc = accuracy(array![1, 1, 1].view(), array![0, 0, 0].view()).unwrap();
        assert_eq!(acc.to_string(), "0.00");
        let acc = accuracy(array![1, 1, 1].view(), array![1, 0, 0].view()).unwrap();
        assert_eq!(acc.to_string(), "0.33");
    }

    #[test]
    fn rejects_mismatched_or_empty_input() {
        assert!(matches!(
            accuracy(array![0, 1].view(), array![0].view()),
            Err(ForestError::LengthMismatch { expected: 2, found: 1 })
        ));
        let empty: [usize; 0] = [];
        assert!(matches!(
            accuracy(ArrayView1::from(&empty[..]), ArrayView1::from(&empty[..])),
            Err(ForestError::EmptyInput)
        ));
    }
}
