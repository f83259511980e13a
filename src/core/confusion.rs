//! Confusion matrix with a trailing "unknown" row and column.

use std::fmt;

use crate::core::format::round_to;
use crate::error::{Result, VisualsError, ensure_non_empty, ensure_same_len};

/// Square matrix of size `codebook.len() + 1`.
///
/// `matrix[actual][predicted]` counts samples; the last index stands for
/// predictions that did not match any codebook entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<f64>>,
}

impl ConfusionMatrix {
    pub fn zeros(n_known: usize) -> Self {
        let n = n_known + 1;
        Self {
            matrix: vec![vec![0.0; n]; n],
        }
    }

    /// Accumulate every holdout's predictions against its actual labels.
    pub fn accumulate<T: PartialEq>(
        predicted: &[Vec<T>],
        actual: &[Vec<T>],
        codebook: &[T],
    ) -> Result<Self> {
        ensure_non_empty(codebook, "codebook")?;
        ensure_same_len(predicted, actual, "holdout predictions/actuals")?;

        let mut cm = Self::zeros(codebook.len());
        let unknown = codebook.len();
        let mut position = 0usize;
        for (predictions, actuals) in predicted.iter().zip(actual) {
            ensure_same_len(predictions, actuals, "predictions/actuals")?;
            for (prediction, label) in predictions.iter().zip(actuals) {
                let row = codebook
                    .iter()
                    .position(|c| c == label)
                    .ok_or(VisualsError::UnknownLabel { index: position })?;
                let column = codebook
                    .iter()
                    .position(|c| c == prediction)
                    .unwrap_or(unknown);
                cm.matrix[row][column] += 1.0;
                position += 1;
            }
        }
        Ok(cm)
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Dimension including the unknown label.
    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    pub fn get(&self, actual: usize, predicted: usize) -> f64 {
        self.matrix[actual][predicted]
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        self.matrix[row].iter().sum()
    }

    pub fn total(&self) -> f64 {
        self.matrix.iter().flatten().sum()
    }

    pub fn max_value(&self) -> f64 {
        self.matrix.iter().flatten().copied().fold(0.0, f64::max)
    }

    /// Divide each row by its sum, rounded to two decimals. All-zero rows are left alone.
    pub fn normalize_rows(&mut self) {
        for row in &mut self.matrix {
            let sum: f64 = row.iter().sum();
            if sum > 0.0 {
                for value in row.iter_mut() {
                    *value = round_to(*value / sum, 2);
                }
            }
        }
    }

    pub fn row_normalized(&self) -> Self {
        let mut cm = self.clone();
        cm.normalize_rows();
        cm
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "{:>8}", "")?;
        for j in 0..n {
            if j + 1 == n {
                write!(f, "{:>8}", "Pred ?")?;
            } else {
                write!(f, "{:>8}", format!("Pred {j}"))?;
            }
        }
        writeln!(f)?;
        for (i, row) in self.matrix.iter().enumerate() {
            write!(f, "{:>8}", format!("True {i}"))?;
            for value in row {
                write!(f, "{value:>8.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_predictions_fill_diagonal() {
        let codebook = vec!["a", "b", "c"];
        let actual = vec![vec!["a", "b", "b", "c", "a"]];
        let cm = ConfusionMatrix::accumulate(&actual.clone(), &actual, &codebook).unwrap();
        assert_eq!(cm.size(), 4);
        assert_eq!(cm.get(0, 0), 2.0);
        assert_eq!(cm.get(1, 1), 2.0);
        assert_eq!(cm.get(2, 2), 1.0);
        for i in 0..cm.size() {
            for j in 0..cm.size() {
                if i != j {
                    assert_eq!(cm.get(i, j), 0.0);
                }
            }
        }
        assert_eq!(cm.row_sum(0), 2.0);
        assert_eq!(cm.row_sum(3), 0.0);
    }

    #[test]
    fn unmatched_predictions_go_to_unknown_column() {
        let codebook = vec![vec![0u8, 1], vec![1, 0]];
        let predicted = vec![vec![vec![1u8, 1], vec![1, 0]], vec![vec![0, 1]]];
        let actual = vec![vec![vec![0u8, 1], vec![1, 0]], vec![vec![1, 0]]];
        let cm = ConfusionMatrix::accumulate(&predicted, &actual, &codebook).unwrap();
        assert_eq!(cm.get(0, 2), 1.0);
        assert_eq!(cm.get(1, 1), 1.0);
        assert_eq!(cm.get(1, 0), 1.0);
        assert_eq!(cm.total(), 3.0);
    }

    #[test]
    fn normalisation_skips_zero_rows() {
        let codebook = vec![0, 1];
        let predicted = vec![vec![0, 1, 1, 7]];
        let actual = vec![vec![0, 0, 0, 0]];
        let cm = ConfusionMatrix::accumulate(&predicted, &actual, &codebook)
            .unwrap()
            .row_normalized();
        assert_eq!(cm.matrix()[0], vec![0.25, 0.5, 0.25]);
        assert!(cm.matrix()[1].iter().all(|v| *v == 0.0));
        assert!(cm.matrix()[2].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn rejects_labels_outside_codebook() {
        let err = ConfusionMatrix::accumulate(&[vec![1]], &[vec![9]], &[1, 2]).unwrap_err();
        assert!(matches!(err, VisualsError::UnknownLabel { index: 0 }));
    }

    #[test]
    fn rejects_mismatched_holdouts() {
        assert!(ConfusionMatrix::accumulate(&[vec![1], vec![2]], &[vec![1]], &[1, 2]).is_err());
        assert!(ConfusionMatrix::accumulate(&[vec![1, 2]], &[vec![1]], &[1, 2]).is_err());
        assert!(ConfusionMatrix::accumulate::<u8>(&[], &[], &[]).is_err());
    }
}
