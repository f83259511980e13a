//! Accuracy and error series handed over by the experiment driver.

use crate::error::{Result, ensure_non_empty, ensure_same_len};

/// Accuracy per split, in the order the driver recorded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracySeries {
    points: Vec<(f64, f64)>,
}

impl AccuracySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the accuracy for `split`, keeping first-insertion order.
    pub fn insert(&mut self, split: f64, accuracy: f64) {
        match self.points.iter_mut().find(|(s, _)| *s == split) {
            Some(point) => point.1 = accuracy,
            None => self.points.push((split, accuracy)),
        }
    }

    pub fn get(&self, split: f64) -> Option<f64> {
        self.points.iter().find(|(s, _)| *s == split).map(|(_, a)| *a)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn splits(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(s, _)| *s)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(f64, f64)> for AccuracySeries {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (split, accuracy) in iter {
            series.insert(split, accuracy);
        }
        series
    }
}

impl<const N: usize> From<[(f64, f64); N]> for AccuracySeries {
    fn from(points: [(f64, f64); N]) -> Self {
        points.into_iter().collect()
    }
}

/// Min, max and mean accuracy per split for known and unknown classes, across holdouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracySummary {
    pub known_min: AccuracySeries,
    pub known_max: AccuracySeries,
    pub unknown_min: AccuracySeries,
    pub unknown_max: AccuracySeries,
    pub known_mean: AccuracySeries,
    pub unknown_mean: AccuracySeries,
}

impl AccuracySummary {
    pub fn validate(&self) -> Result<()> {
        for (series, what) in [
            (&self.known_min, "known min accuracies"),
            (&self.known_max, "known max accuracies"),
            (&self.unknown_min, "unknown min accuracies"),
            (&self.unknown_max, "unknown max accuracies"),
            (&self.known_mean, "known mean accuracies"),
            (&self.unknown_mean, "unknown mean accuracies"),
        ] {
            ensure_non_empty(series.points(), what)?;
        }
        Ok(())
    }
}

/// A named curve over time, e.g. cumulative detection error.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeries<'a> {
    pub time: &'a [f64],
    pub values: &'a [f64],
}

impl<'a> TimeSeries<'a> {
    pub fn new(time: &'a [f64], values: &'a [f64]) -> Self {
        Self { time, values }
    }

    pub fn validate(&self, what: &'static str) -> Result<()> {
        ensure_non_empty(self.values, what)?;
        ensure_same_len(self.time, self.values, what)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.time.iter().copied().zip(self.values.iter().copied())
    }
}

/// Error curves for one unknown split: reinforcement phase followed by testing phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorPhaseCurves {
    pub split: f64,
    pub reinforcement_time: Vec<f64>,
    pub reinforcement_error: Vec<f64>,
    pub reinforcement_std: Vec<f64>,
    pub testing_time: Vec<f64>,
    pub testing_error: Vec<f64>,
    pub testing_std: Vec<f64>,
}

impl ErrorPhaseCurves {
    pub fn validate(&self) -> Result<()> {
        TimeSeries::new(&self.reinforcement_time, &self.reinforcement_error)
            .validate("reinforcement error")?;
        TimeSeries::new(&self.testing_time, &self.testing_error).validate("testing error")?;
        Ok(())
    }
}

/// Upper and lower edges of a `mean ± std` band, truncated to the shorter input.
pub fn std_band(mean: &[f64], std: &[f64]) -> (Vec<f64>, Vec<f64>) {
    mean.iter()
        .zip(std)
        .map(|(m, s)| (m + s, m - s))
        .unzip()
}

/// (min, max) over the finite values of every slice, or `None` if there are none.
pub fn value_bounds<'a>(slices: impl IntoIterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for slice in slices {
        for &v in slice.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
}
