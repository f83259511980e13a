//! ROC points and area-under-curve estimation.

use crate::error::{Result, ensure_non_empty, ensure_same_len};

/// Integration rule between consecutive ROC points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AucRule {
    /// `Δfpr * tpr_i`.
    #[default]
    LeftRiemann,
    /// `Δfpr * (tpr_i + tpr_{i+1}) / 2`.
    Trapezoid,
}

/// How points are ordered before integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointOrdering {
    /// Sort `(fpr, tpr)` pairs by fpr, keeping each pair intact.
    #[default]
    Paired,
    /// Sort fpr and tpr separately. Only equals `Paired` when both are already co-monotonic.
    Independent,
}

/// The threshold picked as optimal, with the accuracies it achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub known_accuracy: f64,
    pub unknown_accuracy: f64,
    pub threshold: f64,
}

impl OperatingPoint {
    /// (fpr, tpr) position on the ROC plane.
    pub fn roc_coord(&self) -> (f64, f64) {
        (1.0 - self.known_accuracy, self.unknown_accuracy)
    }
}

/// False-positive rate for each known-class accuracy: `1 - acc`.
pub fn false_positive_rates(known_accuracies: &[f64]) -> Vec<f64> {
    known_accuracies.iter().map(|acc| 1.0 - acc).collect()
}

/// Area under the curve traced by `fpr`/`tpr`.
pub fn auc_from_fpr_tpr(
    fpr: &[f64],
    tpr: &[f64],
    rule: AucRule,
    ordering: PointOrdering,
) -> Result<f64> {
    ensure_non_empty(fpr, "false positive rates")?;
    ensure_same_len(fpr, tpr, "fpr/tpr")?;

    let points = roc_points(fpr, tpr, ordering);
    let area = points
        .windows(2)
        .map(|w| {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            let height = match rule {
                AucRule::LeftRiemann => y0,
                AucRule::Trapezoid => (y0 + y1) / 2.0,
            };
            (x1 - x0) * height
        })
        .sum();
    Ok(area)
}

/// `(fpr, tpr)` points in integration order; extra elements of the longer slice are ignored.
pub fn roc_points(fpr: &[f64], tpr: &[f64], ordering: PointOrdering) -> Vec<(f64, f64)> {
    match ordering {
        PointOrdering::Paired => {
            let mut points: Vec<(f64, f64)> =
                fpr.iter().copied().zip(tpr.iter().copied()).collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            points
        }
        PointOrdering::Independent => {
            let mut xs = fpr.to_vec();
            let mut ys = tpr.to_vec();
            xs.sort_by(f64::total_cmp);
            ys.sort_by(f64::total_cmp);
            xs.into_iter().zip(ys).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} vs {b}");
    }

    #[test]
    fn operating_point_maps_known_accuracy_to_fpr() {
        let point = OperatingPoint {
            known_accuracy: 0.75,
            unknown_accuracy: 0.6,
            threshold: 4.5,
        };
        assert_eq!(point.roc_coord(), (0.25, 0.6));
    }

    #[test]
    fn degenerate_curve_has_zero_area() {
        let fpr = false_positive_rates(&[1.0, 1.0, 1.0]);
        assert_eq!(fpr, vec![0.0, 0.0, 0.0]);
        let area =
            auc_from_fpr_tpr(&fpr, &[0.2, 0.5, 0.9], AucRule::LeftRiemann, PointOrdering::Paired)
                .unwrap();
        assert_close(area, 0.0);
    }

    #[test]
    fn left_and_trapezoid_rules() {
        let fpr = [0.0, 0.5, 1.0];
        let tpr = [1.0, 1.0, 0.0];
        let left = auc_from_fpr_tpr(&fpr, &tpr, AucRule::LeftRiemann, PointOrdering::Paired);
        let trap = auc_from_fpr_tpr(&fpr, &tpr, AucRule::Trapezoid, PointOrdering::Paired);
        assert_close(left.unwrap(), 1.0);
        assert_close(trap.unwrap(), 0.75);
    }

    #[test]
    fn independent_ordering_breaks_pairs() {
        let fpr = [0.0, 0.5, 1.0];
        let tpr = [1.0, 1.0, 0.0];
        let area =
            auc_from_fpr_tpr(&fpr, &tpr, AucRule::LeftRiemann, PointOrdering::Independent)
                .unwrap();
        assert_close(area, 0.5);
    }

    #[test]
    fn paired_ordering_sorts_by_fpr() {
        let fpr = [1.0, 0.0, 0.5];
        let tpr = [1.0, 0.0, 0.8];
        let area =
            auc_from_fpr_tpr(&fpr, &tpr, AucRule::Trapezoid, PointOrdering::Paired).unwrap();
        assert_close(area, 0.5 * 0.4 + 0.5 * 0.9);
    }

    #[test]
    fn single_point_and_bad_input() {
        assert_close(
            auc_from_fpr_tpr(&[0.3], &[0.7], AucRule::Trapezoid, PointOrdering::Paired).unwrap(),
            0.0,
        );
        assert!(auc_from_fpr_tpr(&[], &[], AucRule::default(), PointOrdering::default()).is_err());
        assert!(
            auc_from_fpr_tpr(&[0.1, 0.2], &[0.5], AucRule::default(), PointOrdering::default())
                .is_err()
        );
    }
}
