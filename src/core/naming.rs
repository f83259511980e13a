//! File names for every figure, built from a typed run record.
//!
//! Each function returns a file stem; the renderer appends the extension of the
//! configured image format.

use crate::core::codeword::codeword_key;
use crate::core::format::{format_number, round_to};
use crate::core::model::ClassifierModel;
use crate::error::{Result, VisualsError};

/// Metadata describing one experiment configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub model: ClassifierModel,
    pub codebook_num: usize,
    pub codeword_len: usize,
    pub holdout: usize,
    pub split: f64,
    pub threshold: f64,
    pub seed: u64,
    pub known_holdout_samples: usize,
    pub training_fraction: f64,
    pub percent_known_classes: f64,
}

impl RunInfo {
    pub fn new(model: ClassifierModel, codebook_num: usize, codeword_len: usize) -> Self {
        Self {
            model,
            codebook_num,
            codeword_len,
            holdout: 0,
            split: 0.0,
            threshold: 0.0,
            seed: 0,
            known_holdout_samples: 0,
            training_fraction: 0.0,
            percent_known_classes: 0.0,
        }
    }

    pub fn holdout(mut self, holdout: usize) -> Self {
        self.holdout = holdout;
        self
    }

    pub fn split(mut self, split: f64) -> Self {
        self.split = split;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn known_holdout_samples(mut self, count: usize) -> Self {
        self.known_holdout_samples = count;
        self
    }

    pub fn training_fraction(mut self, fraction: f64) -> Self {
        self.training_fraction = fraction;
        self
    }

    pub fn percent_known_classes(mut self, percent: f64) -> Self {
        self.percent_known_classes = percent;
        self
    }

    /// Histogram title: codebook and split, then seed and holdout on their own lines.
    pub fn histogram_title(&self) -> String {
        format!(
            "Codebook: {} Split: {} new\n Seed: {}\n Holdout: {}",
            self.codebook_num,
            format_number(self.split),
            self.seed,
            self.holdout
        )
    }

    fn model_codebook_prefix(&self) -> String {
        format!(
            "{}_CB{}_CWLength({})",
            self.model.display_name(),
            self.codebook_num,
            self.codeword_len
        )
    }

    fn sample_suffix(&self) -> String {
        format!(
            "_UnknownHoldoutClasses1_KnownHoldoutSamples{}_PercentTrainingData{}",
            self.known_holdout_samples,
            format_number(self.training_fraction)
        )
    }
}

/// Whether a threshold histogram shows the distances used to pick the threshold or to test it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStage {
    Building,
    Testing,
}

impl ThresholdStage {
    fn tag(self) -> &'static str {
        match self {
            ThresholdStage::Building => "BuildingThreshold",
            ThresholdStage::Testing => "TestingThreshold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfusionKind {
    /// Raw accumulated counts.
    Original,
    /// Row-normalised rates.
    Averaged,
}

impl ConfusionKind {
    fn tag(self) -> &'static str {
        match self {
            ConfusionKind::Original => "Original",
            ConfusionKind::Averaged => "Averaged",
        }
    }
}

/// `known_train / (all - unknown)`, rounded to two decimals.
pub fn training_fraction(known_train: usize, all_data: usize, unknown_data: usize) -> Result<f64> {
    let known = all_data.saturating_sub(unknown_data);
    if known == 0 {
        return Err(VisualsError::NoKnownData);
    }
    Ok(round_to(known_train as f64 / known as f64, 2))
}

pub fn threshold_histogram_stem(stage: ThresholdStage, run: &RunInfo) -> String {
    format!(
        "_{}_{}_Holdout{}_Split{}_Threshold{}{}",
        stage.tag(),
        run.model_codebook_prefix(),
        run.holdout,
        format_number(run.split),
        format_number(run.threshold),
        run.sample_suffix()
    )
}

pub fn holdout_stem(run: &RunInfo) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        run.holdout,
        format_number(run.split),
        format_number(run.threshold),
        run.codebook_num,
        run.model.display_name()
    )
}

pub fn single_data_holdout_stem(run: &RunInfo) -> String {
    format!("SingleData_{}", holdout_stem(run))
}

pub fn accuracy_stem(run: &RunInfo) -> String {
    format!(
        "{}{}_PercentKnownClasses{}",
        run.model_codebook_prefix(),
        run.sample_suffix(),
        format_number(run.percent_known_classes)
    )
}

/// Accuracy layout prefixed `MeansOnly_`, so it never overwrites the min/max figure.
pub fn means_only_accuracy_stem(run: &RunInfo) -> String {
    format!("MeansOnly_{}", accuracy_stem(run))
}

pub fn reinforced_accuracy_stem(run: &RunInfo) -> String {
    format!("{}{}", run.model_codebook_prefix(), run.sample_suffix())
}

pub fn roc_stem(run: &RunInfo) -> String {
    format!(
        "{}_Split({})",
        run.model_codebook_prefix(),
        format_number(run.split)
    )
}

pub fn confusion_stem(kind: ConfusionKind, run: &RunInfo) -> String {
    format!("_{}_{}", kind.tag(), roc_stem(run))
}

pub fn roc_codeword_length_stem(run: &RunInfo) -> String {
    format!("ROC_VaryingCodewordLength_{}", roc_stem(run))
}

pub fn codeword_frequency_stem(chosen: &[u8], top_five: bool) -> String {
    let prefix = if top_five {
        "CodewordFrequencyTopFive"
    } else {
        "CodewordFrequency"
    };
    format!("{prefix}_{}", codeword_key(chosen))
}

pub fn bit_frequency_stem(codeword_len: usize, samples: usize) -> String {
    format!("BitFrequency_CWLength({codeword_len})_Samples{samples}")
}

pub fn error_over_time_stem(tag: &str, points: usize) -> String {
    format!("ErrorOverTime_{tag}_Time{points}")
}
