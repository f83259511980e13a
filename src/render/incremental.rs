//! Figures for the incremental-learning workflow.

use std::path::PathBuf;

use plotters::prelude::*;
use plotters::style::full_palette::PURPLE;
use tracing::debug;

use crate::config::RenderConfig;
use crate::core::codeword::{CodewordFrequencies, bit_frequencies, codeword_key};
use crate::core::format::{format_rounded, percent_label};
use crate::core::naming::{
    RunInfo, bit_frequency_stem, codeword_frequency_stem, error_over_time_stem,
    reinforced_accuracy_stem,
};
use crate::core::series::{AccuracySeries, ErrorPhaseCurves, std_band};
use crate::error::{Result, ensure_non_empty};
use crate::render::bars::{BitFrequencyPlot, CodewordBarPlot};
use crate::render::figure::save_plot;
use crate::render::lines::{AccuracyCurvePlot, Band, Curve, TimeSeriesPlot};
use crate::render::primitives::{LegendCorner, LinePattern};
use crate::render::visuals::three_error_plot;

const TOP_CODEWORDS: usize = 5;
const BAND_COLORS: [RGBColor; 3] = [BLUE, PURPLE, RED];

#[derive(Debug, Clone, Default)]
pub struct IncrementalLearningVisuals {
    config: RenderConfig,
    show_std_band: bool,
}

impl IncrementalLearningVisuals {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            show_std_band: false,
        }
    }

    /// Shade `mean ± std` around each phase curve in [`Self::error_over_time_splits`].
    pub fn with_std_band(mut self, show: bool) -> Self {
        self.show_std_band = show;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn size(&self) -> (u32, u32) {
        (self.config.figure.width, self.config.figure.height)
    }

    fn wide_size(&self) -> (u32, u32) {
        (self.config.figure.wide_width, self.config.figure.height)
    }

    /// Every distinct codeword produced for unseen data, with its count.
    pub fn codeword_frequency<W: AsRef<[u8]>>(
        &self,
        words: &[W],
        chosen: &[u8],
        accuracy: f64,
    ) -> Result<PathBuf> {
        ensure_non_empty(words, "codewords")?;
        let freq = CodewordFrequencies::count(words);
        let plot = CodewordBarPlot {
            title: format!(
                "Codeword Frequency\nChosen Codeword: {}\nAccuracy: {}",
                codeword_key(chosen),
                format_rounded(accuracy, 2)
            ),
            bars: freq.entries().to_vec(),
            rotate_labels: true,
        };
        save_plot(
            &self.config,
            &codeword_frequency_stem(chosen, false),
            self.size(),
            &plot,
        )
    }

    /// The five most frequent codewords, highest count first.
    pub fn codeword_frequency_top_five<W: AsRef<[u8]>>(
        &self,
        words: &[W],
        chosen: &[u8],
        accuracy: f64,
    ) -> Result<PathBuf> {
        ensure_non_empty(words, "codewords")?;
        let top = CodewordFrequencies::count(words).top(TOP_CODEWORDS);
        debug!(shown = top.len(), "top codewords");
        let plot = CodewordBarPlot {
            title: format!(
                "Top Five Most Frequent Codewords\nChosen Codeword: {}\nAccuracy: {}",
                codeword_key(chosen),
                format_rounded(accuracy, 2)
            ),
            bars: top,
            rotate_labels: false,
        };
        save_plot(
            &self.config,
            &codeword_frequency_stem(chosen, true),
            self.size(),
            &plot,
        )
    }

    /// Zeros and ones at each codeword index.
    pub fn bit_frequency<W: AsRef<[u8]>>(&self, words: &[W], accuracy: f64) -> Result<PathBuf> {
        let counts = bit_frequencies(words)?;
        let stem = bit_frequency_stem(counts.len(), words.len());
        let plot = BitFrequencyPlot {
            title: format!("Index Bit Frequency\nAccuracy: {}", format_rounded(accuracy, 2)),
            counts,
        };
        save_plot(&self.config, &stem, self.wide_size(), &plot)
    }

    /// Accuracy per split before and after codeword reinforcement.
    pub fn reinforced_vs_initial(
        &self,
        initial: &AccuracySeries,
        reinforced: &AccuracySeries,
        splits: &[f64],
        run: &RunInfo,
    ) -> Result<PathBuf> {
        ensure_non_empty(initial.points(), "initial codeword accuracies")?;
        ensure_non_empty(reinforced.points(), "reinforced codeword accuracies")?;
        let plot = AccuracyCurvePlot {
            title: "Prediction Accuracy per Split".to_string(),
            curves: vec![
                Curve::new("Initial Codeword", initial.points().to_vec(), MAGENTA)
                    .with_markers()
                    .pattern(LinePattern::Dashed),
                Curve::new("Reinforced Codeword", reinforced.points().to_vec(), CYAN)
                    .with_markers()
                    .pattern(LinePattern::Dashed),
            ],
            ticks: splits.to_vec(),
        };
        save_plot(
            &self.config,
            &reinforced_accuracy_stem(run),
            self.wide_size(),
            &plot,
        )
    }

    /// Reinforcement then testing error for each split, told apart by line pattern.
    pub fn error_over_time_splits(&self, phases: &[ErrorPhaseCurves]) -> Result<PathBuf> {
        ensure_non_empty(phases, "error phases")?;
        let mut curves = Vec::with_capacity(phases.len() * 2);
        let mut bands = Vec::new();
        for (i, phase) in phases.iter().enumerate() {
            phase.validate()?;
            let pattern = LinePattern::cycle(i);
            let reinforcement: Vec<(f64, f64)> = phase
                .reinforcement_time
                .iter()
                .copied()
                .zip(phase.reinforcement_error.iter().copied())
                .collect();
            let testing: Vec<(f64, f64)> = phase
                .testing_time
                .iter()
                .copied()
                .zip(phase.testing_error.iter().copied())
                .collect();
            curves.push(Curve::new(percent_label(phase.split), reinforcement, GREEN).pattern(pattern));
            curves.push(Curve::unlabeled(testing, GREEN).pattern(pattern));

            if self.show_std_band {
                let color = BAND_COLORS[i % BAND_COLORS.len()];
                bands.extend(phase_band(
                    &phase.reinforcement_time,
                    &phase.reinforcement_error,
                    &phase.reinforcement_std,
                    color,
                ));
                bands.extend(phase_band(
                    &phase.testing_time,
                    &phase.testing_error,
                    &phase.testing_std,
                    color,
                ));
            }
        }

        let points = phases
            .iter()
            .map(|p| p.reinforcement_time.len() + p.testing_time.len())
            .max()
            .unwrap_or(0);
        let plot = TimeSeriesPlot {
            title: None,
            y_desc: "Mean Cumulative Error".to_string(),
            curves,
            bands,
            legend: LegendCorner::UpperLeft,
        };
        save_plot(
            &self.config,
            &error_over_time_stem(&format!("Splits{}", phases.len()), points),
            self.size(),
            &plot,
        )
    }

    /// New-class detection, known detection and known classification error over time.
    pub fn error_over_time_three(
        &self,
        time: &[f64],
        new_class: &[f64],
        known_detection: &[f64],
        known_classification: &[f64],
    ) -> Result<PathBuf> {
        let plot = three_error_plot(
            time,
            [
                ("New Class Detection Error", new_class),
                ("Known Class Detection Error", known_detection),
                ("Known Class Classification Error", known_classification),
            ],
        )?;
        save_plot(
            &self.config,
            &error_over_time_stem("NewClassDetection", time.len()),
            self.size(),
            &plot,
        )
    }
}

/// `mean ± std` band over `time`, or nothing when there is no std to draw.
fn phase_band(time: &[f64], mean: &[f64], std: &[f64], color: RGBColor) -> Option<Band> {
    let (upper, lower) = std_band(mean, std);
    if upper.is_empty() {
        return None;
    }
    let x = time[..upper.len().min(time.len())].to_vec();
    let n = x.len();
    Some(Band {
        x,
        upper: upper[..n].to_vec(),
        lower: lower[..n].to_vec(),
        color,
    })
}
