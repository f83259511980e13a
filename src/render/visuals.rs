//! General-purpose experiment figures: histograms, accuracy curves, ROC, confusion matrices.

use std::path::PathBuf;

use plotters::prelude::*;
use tracing::debug;

use crate::config::RenderConfig;
use crate::core::confusion::ConfusionMatrix;
use crate::core::format::format_rounded;
use crate::core::naming::{
    ConfusionKind, RunInfo, ThresholdStage, accuracy_stem, confusion_stem, error_over_time_stem,
    holdout_stem, means_only_accuracy_stem, roc_codeword_length_stem, roc_stem,
    single_data_holdout_stem, threshold_histogram_stem,
};
use crate::core::roc::{
    AucRule, OperatingPoint, PointOrdering, auc_from_fpr_tpr, false_positive_rates, roc_points,
};
use crate::core::series::{AccuracySeries, AccuracySummary, TimeSeries};
use crate::error::{Result, VisualsError, ensure_non_empty, ensure_same_len};
use crate::render::figure::save_plot;
use crate::render::heatmap::ConfusionHeatmapPlot;
use crate::render::histogram::{DistanceLayer, HammingHistogramPlot, LegendPlacement};
use crate::render::lines::{AccuracyCurvePlot, Curve, TimeSeriesPlot};
use crate::render::primitives::{LegendCorner, LinePattern};
use crate::render::roc::{RocCurve, RocPlot};

/// Default fill of the known-class histogram.
const KNOWN_BLUE: RGBColor = RGBColor(31, 119, 180);

/// Known and unknown accuracy reported next to a threshold histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionAccuracy {
    pub known: f64,
    pub unknown: f64,
}

/// Path of a written ROC figure together with the area it reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RocFigure {
    pub path: PathBuf,
    pub auc: f64,
}

/// Both confusion heatmaps plus the row-normalised matrix behind the second one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionFigures {
    pub original: PathBuf,
    pub averaged: PathBuf,
    pub normalized: ConfusionMatrix,
}

/// One curve in the codeword-length ROC overlay.
#[derive(Debug, Clone)]
pub struct LengthRoc<'a> {
    pub label: String,
    pub unknown_accuracies: &'a [f64],
    pub known_accuracies: &'a [f64],
    pub best: OperatingPoint,
}

/// Renderer for the anomaly-detection figures.
#[derive(Debug, Clone, Default)]
pub struct Visuals {
    config: RenderConfig,
    auc_rule: AucRule,
    ordering: PointOrdering,
}

impl Visuals {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            auc_rule: AucRule::default(),
            ordering: PointOrdering::default(),
        }
    }

    /// Pick the integration rule and point ordering used for the ROC title.
    pub fn with_auc(mut self, rule: AucRule, ordering: PointOrdering) -> Self {
        self.auc_rule = rule;
        self.ordering = ordering;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn standard_size(&self) -> (u32, u32) {
        (self.config.figure.width, self.config.figure.height)
    }

    fn wide_size(&self) -> (u32, u32) {
        (self.config.figure.wide_width, self.config.figure.height)
    }

    /// Known and unknown distances against the chosen threshold.
    pub fn threshold_histogram(
        &self,
        known: &[u32],
        unknown: &[u32],
        threshold: f64,
        run: &RunInfo,
        accuracy: DetectionAccuracy,
        stage: ThresholdStage,
    ) -> Result<PathBuf> {
        if known.is_empty() && unknown.is_empty() {
            return Err(VisualsError::EmptyInput {
                what: "hamming distances",
            });
        }
        debug!(
            known = known.len(),
            unknown = unknown.len(),
            ?stage,
            "threshold histogram"
        );
        let run = run.clone().threshold(threshold);
        let plot = HammingHistogramPlot {
            title: run.histogram_title(),
            layers: vec![
                DistanceLayer {
                    distances: known,
                    label: format!("Known Classes: ({})", format_rounded(accuracy.known, 2)),
                    color: KNOWN_BLUE,
                    alpha: 1.0,
                },
                DistanceLayer {
                    distances: unknown,
                    label: format!(
                        "Unknown Classes: ({})",
                        format_rounded(accuracy.unknown, 2)
                    ),
                    color: GREEN,
                    alpha: 0.6,
                },
            ],
            threshold,
            legend: LegendPlacement::Outside,
        };
        save_plot(
            &self.config,
            &threshold_histogram_stem(stage, &run),
            self.wide_size(),
            &plot,
        )
    }

    fn single_layer_histogram(
        &self,
        distances: &[u32],
        threshold: f64,
        accuracy: f64,
        run: &RunInfo,
        stem: &str,
    ) -> Result<PathBuf> {
        ensure_non_empty(distances, "holdout hamming distances")?;
        let plot = HammingHistogramPlot {
            title: run.histogram_title(),
            layers: vec![DistanceLayer {
                distances,
                label: format!("Accuracy: ({})", format_rounded(accuracy, 2)),
                color: GREEN,
                alpha: 1.0,
            }],
            threshold,
            legend: LegendPlacement::UpperRight,
        };
        save_plot(&self.config, stem, self.standard_size(), &plot)
    }

    /// Holdout-class distances against the threshold.
    pub fn holdout_histogram(
        &self,
        distances: &[u32],
        threshold: f64,
        accuracy: f64,
        run: &RunInfo,
    ) -> Result<PathBuf> {
        let run = run.clone().threshold(threshold);
        self.single_layer_histogram(distances, threshold, accuracy, &run, &holdout_stem(&run))
    }

    /// Same layout as [`Visuals::holdout_histogram`] for single held-out samples.
    pub fn single_data_holdout_histogram(
        &self,
        distances: &[u32],
        threshold: f64,
        accuracy: f64,
        run: &RunInfo,
    ) -> Result<PathBuf> {
        let run = run.clone().threshold(threshold);
        self.single_layer_histogram(
            distances,
            threshold,
            accuracy,
            &run,
            &single_data_holdout_stem(&run),
        )
    }

    /// Min, max and mean accuracy per split for known and unknown classes.
    pub fn accuracies_min_max(
        &self,
        summary: &AccuracySummary,
        splits: &[f64],
        run: &RunInfo,
    ) -> Result<PathBuf> {
        summary.validate()?;
        let solid = |label: &str, series: &AccuracySeries, color: RGBColor| {
            Curve::new(label, series.points().to_vec(), color).with_markers()
        };
        let curves = vec![
            solid("Known Max", &summary.known_max, BLUE),
            solid("Known Min", &summary.known_min, RED),
            solid("Unknown Min", &summary.unknown_min, GREEN),
            solid("Unknown Max", &summary.unknown_max, BLACK),
            solid("Known Mean", &summary.known_mean, MAGENTA).pattern(LinePattern::Dashed),
            solid("Unknown Mean", &summary.unknown_mean, CYAN).pattern(LinePattern::Dashed),
        ];
        self.accuracy_figure(curves, splits, &accuracy_stem(run))
    }

    /// Mean known and unknown accuracy per split.
    pub fn accuracies_means_only(
        &self,
        known_mean: &AccuracySeries,
        unknown_mean: &AccuracySeries,
        splits: &[f64],
        run: &RunInfo,
    ) -> Result<PathBuf> {
        ensure_non_empty(known_mean.points(), "known mean accuracies")?;
        ensure_non_empty(unknown_mean.points(), "unknown mean accuracies")?;
        let curves = vec![
            Curve::new("Known Mean", known_mean.points().to_vec(), MAGENTA).with_markers(),
            Curve::new("Unknown Mean", unknown_mean.points().to_vec(), CYAN).with_markers(),
        ];
        self.accuracy_figure(curves, splits, &means_only_accuracy_stem(run))
    }

    fn accuracy_figure(&self, curves: Vec<Curve>, splits: &[f64], stem: &str) -> Result<PathBuf> {
        let plot = AccuracyCurvePlot {
            title: "Detection Rate per Split".to_string(),
            curves,
            ticks: splits.to_vec(),
        };
        save_plot(&self.config, stem, self.wide_size(), &plot)
    }

    /// ROC from per-threshold accuracies; unknown accuracy is the true positive rate.
    pub fn roc(
        &self,
        unknown_accuracies: &[f64],
        known_accuracies: &[f64],
        best: OperatingPoint,
        run: &RunInfo,
    ) -> Result<RocFigure> {
        let (plot, auc) = self.roc_plot(unknown_accuracies, known_accuracies, best)?;
        let path = save_plot(&self.config, &roc_stem(run), self.standard_size(), &plot)?;
        Ok(RocFigure { path, auc })
    }

    /// The curve is drawn through the same ordered points the area is integrated over.
    fn roc_plot(
        &self,
        unknown_accuracies: &[f64],
        known_accuracies: &[f64],
        best: OperatingPoint,
    ) -> Result<(RocPlot, f64)> {
        ensure_same_len(known_accuracies, unknown_accuracies, "known/unknown accuracies")?;
        let fpr = false_positive_rates(known_accuracies);
        let auc = auc_from_fpr_tpr(&fpr, unknown_accuracies, self.auc_rule, self.ordering)?;
        debug!(auc, points = fpr.len(), "roc area");

        let plot = RocPlot {
            title: format!("ROC\nAUC={}", format_rounded(auc, 2)),
            curves: vec![RocCurve {
                label: None,
                points: roc_points(&fpr, unknown_accuracies, self.ordering),
                color: KNOWN_BLUE,
                best: best.roc_coord(),
                best_label: Some(format!(
                    "Avg. Optimal Threshold={}\nAccuracy={}",
                    format_rounded(best.threshold, 1),
                    format_rounded(best.unknown_accuracy, 2)
                )),
            }],
        };
        Ok((plot, auc))
    }

    /// One ROC curve per codeword length, overlaid in a single figure.
    pub fn roc_varying_codeword_length(
        &self,
        curves: &[LengthRoc<'_>],
        run: &RunInfo,
    ) -> Result<PathBuf> {
        ensure_non_empty(curves, "codeword length curves")?;
        const PALETTE: [RGBColor; 6] = [GREEN, BLUE, BLACK, MAGENTA, CYAN, YELLOW];
        let mut roc_curves = Vec::with_capacity(curves.len());
        for (i, curve) in curves.iter().enumerate() {
            ensure_non_empty(curve.known_accuracies, "known accuracies")?;
            ensure_same_len(
                curve.known_accuracies,
                curve.unknown_accuracies,
                "known/unknown accuracies",
            )?;
            let fpr = false_positive_rates(curve.known_accuracies);
            roc_curves.push(RocCurve {
                label: Some(curve.label.clone()),
                points: roc_points(&fpr, curve.unknown_accuracies, self.ordering),
                color: PALETTE[i % PALETTE.len()],
                best: curve.best.roc_coord(),
                best_label: (i == 0).then(|| "Avg. Optimal Threshold".to_string()),
            });
        }
        let plot = RocPlot {
            title: "ROC by Codeword Length".to_string(),
            curves: roc_curves,
        };
        save_plot(
            &self.config,
            &roc_codeword_length_stem(run),
            self.standard_size(),
            &plot,
        )
    }

    /// Accumulate predictions over every holdout and draw raw and row-normalised heatmaps.
    pub fn confusion_matrix<T: PartialEq>(
        &self,
        predicted: &[Vec<T>],
        actual: &[Vec<T>],
        codebook: &[T],
        run: &RunInfo,
    ) -> Result<ConfusionFigures> {
        let counts = ConfusionMatrix::accumulate(predicted, actual, codebook)?;
        debug!(total = counts.total(), size = counts.size(), "confusion matrix");
        let normalized = counts.row_normalized();
        let size = self.config.figure.heatmap_size;

        let original = save_plot(
            &self.config,
            &confusion_stem(ConfusionKind::Original, run),
            size,
            &ConfusionHeatmapPlot {
                title: "Confusion Matrix".to_string(),
                matrix: &counts,
            },
        )?;
        let averaged = save_plot(
            &self.config,
            &confusion_stem(ConfusionKind::Averaged, run),
            size,
            &ConfusionHeatmapPlot {
                title: "Confusion Matrix".to_string(),
                matrix: &normalized,
            },
        )?;
        Ok(ConfusionFigures {
            original,
            averaged,
            normalized,
        })
    }

    /// Cumulative unknown-detection, known-detection and known-classification error.
    pub fn error_over_time(
        &self,
        time: &[f64],
        unknown_detection: &[f64],
        known_detection: &[f64],
        known_classification: &[f64],
    ) -> Result<PathBuf> {
        let plot = three_error_plot(
            time,
            [
                ("Unknown Detection Error", unknown_detection),
                ("Known Class Detection Error", known_detection),
                ("Known Class Classification Error", known_classification),
            ],
        )?;
        save_plot(
            &self.config,
            &error_over_time_stem("UnknownDetection", time.len()),
            self.standard_size(),
            &plot,
        )
    }
}

/// Red, blue and green error curves sharing one time axis.
pub(crate) fn three_error_plot(
    time: &[f64],
    series: [(&str, &[f64]); 3],
) -> Result<TimeSeriesPlot> {
    let colors = [RED, BLUE, GREEN];
    let mut curves = Vec::with_capacity(3);
    for ((label, values), color) in series.into_iter().zip(colors) {
        let ts = TimeSeries::new(time, values);
        ts.validate("error over time")?;
        curves.push(Curve::new(label, ts.points().collect(), color));
    }
    Ok(TimeSeriesPlot {
        title: None,
        y_desc: "Mean Error".to_string(),
        curves,
        bands: Vec::new(),
        legend: LegendCorner::UpperRight,
    })
}
