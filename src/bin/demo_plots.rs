use std::error::Error;
use std::fs::create_dir_all;
use std::path::Path;

use anomaly_graphs::core::model::ClassifierModel;
use anomaly_graphs::core::naming::{RunInfo, ThresholdStage, training_fraction};
use anomaly_graphs::core::roc::OperatingPoint;
use anomaly_graphs::core::series::{AccuracySeries, AccuracySummary, ErrorPhaseCurves};
use anomaly_graphs::render::visuals::{DetectionAccuracy, LengthRoc};
use anomaly_graphs::{IncrementalLearningVisuals, RenderConfig, Visuals};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

const SEED: u64 = 7;
const SPLITS: [f64; 3] = [0.1, 0.3, 0.5];
const CODEWORD_LEN: usize = 12;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anomaly_graphs=info".into()),
        )
        .init();

    let out_dir = Path::new("target/plots/demo");
    create_dir_all(out_dir)?;
    let mut config = RenderConfig::load_or_default(out_dir.join("render.toml"));
    config.output_dir = out_dir.to_path_buf();

    let mut rng = StdRng::seed_from_u64(SEED);
    let visuals = Visuals::new(config.clone());
    let incremental = IncrementalLearningVisuals::new(config).with_std_band(true);

    let run = RunInfo::new(ClassifierModel::Svm, 1, CODEWORD_LEN)
        .holdout(2)
        .split(0.3)
        .seed(SEED)
        .known_holdout_samples(40)
        .training_fraction(training_fraction(280, 500, 150)?)
        .percent_known_classes(70.0);

    plot_histograms(&visuals, &run, &mut rng)?;
    plot_accuracies(&visuals, &incremental, &run, &mut rng)?;
    plot_roc(&visuals, &run, &mut rng)?;
    plot_confusion(&visuals, &run, &mut rng)?;
    plot_codewords(&incremental, &mut rng)?;
    plot_errors(&visuals, &incremental, &mut rng)?;

    info!(dir = %out_dir.display(), "demo plots written");
    Ok(())
}

fn distances(rng: &mut StdRng, n: usize, lo: u32, hi: u32) -> Vec<u32> {
    (0..n).map(|_| rng.random_range(lo..hi)).collect()
}

fn plot_histograms(visuals: &Visuals, run: &RunInfo, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let known = distances(rng, 300, 0, 7);
    let mut unknown = distances(rng, 120, 4, 15);
    // Out of the binned range; dropped from the histogram.
    unknown.push(21);
    let accuracy = DetectionAccuracy {
        known: 0.91,
        unknown: 0.78,
    };
    for stage in [ThresholdStage::Building, ThresholdStage::Testing] {
        visuals.threshold_histogram(&known, &unknown, 5.5, run, accuracy, stage)?;
    }
    let holdout = distances(rng, 60, 3, 12);
    visuals.holdout_histogram(&holdout, 5.5, 0.72, run)?;
    visuals.single_data_holdout_histogram(&holdout[..20], 5.5, 0.7, run)?;
    Ok(())
}

fn noisy_series(rng: &mut StdRng, base: f64, slope: f64) -> AccuracySeries {
    SPLITS
        .iter()
        .map(|&s| {
            let acc = base + slope * s + rng.random_range(-0.03..0.03);
            (s, acc.clamp(0.0, 1.0))
        })
        .collect()
}

fn plot_accuracies(
    visuals: &Visuals,
    incremental: &IncrementalLearningVisuals,
    run: &RunInfo,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let summary = AccuracySummary {
        known_min: noisy_series(rng, 0.8, -0.2),
        known_max: noisy_series(rng, 0.95, -0.1),
        unknown_min: noisy_series(rng, 0.4, 0.3),
        unknown_max: noisy_series(rng, 0.6, 0.3),
        known_mean: noisy_series(rng, 0.88, -0.15),
        unknown_mean: noisy_series(rng, 0.5, 0.3),
    };
    visuals.accuracies_min_max(&summary, &SPLITS, run)?;
    visuals.accuracies_means_only(&summary.known_mean, &summary.unknown_mean, &SPLITS, run)?;

    let initial = noisy_series(rng, 0.55, 0.1);
    let reinforced = noisy_series(rng, 0.7, 0.1);
    incremental.reinforced_vs_initial(&initial, &reinforced, &SPLITS, run)?;
    Ok(())
}

/// Known and unknown accuracy for every integer threshold.
fn sweep(known: &[u32], unknown: &[u32]) -> (Vec<f64>, Vec<f64>) {
    (0..=18u32)
        .map(|t| {
            let known_acc = known.iter().filter(|&&d| d <= t).count() as f64 / known.len() as f64;
            let unknown_acc =
                unknown.iter().filter(|&&d| d > t).count() as f64 / unknown.len() as f64;
            (known_acc, unknown_acc)
        })
        .unzip()
}

fn plot_roc(visuals: &Visuals, run: &RunInfo, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let mut curves = Vec::new();
    for (label, spread) in [("1.0c", 6), ("1.5c", 8), ("2.0c", 10)] {
        let known = distances(rng, 200, 0, spread);
        let unknown = distances(rng, 200, spread / 2, spread + 8);
        curves.push((label, sweep(&known, &unknown)));
    }

    let (known_accs, unknown_accs) = &curves[0].1;
    let best = OperatingPoint {
        known_accuracy: known_accs[5],
        unknown_accuracy: unknown_accs[5],
        threshold: 5.4,
    };
    let figure = visuals.roc(unknown_accs, known_accs, best, run)?;
    info!(auc = figure.auc, "roc area");

    let overlay: Vec<LengthRoc<'_>> = curves
        .iter()
        .map(|(label, (known, unknown))| LengthRoc {
            label: format!("{label} Codeword Length"),
            unknown_accuracies: unknown,
            known_accuracies: known,
            best: OperatingPoint {
                known_accuracy: known[5],
                unknown_accuracy: unknown[5],
                threshold: 5.0,
            },
        })
        .collect();
    visuals.roc_varying_codeword_length(&overlay, run)?;
    Ok(())
}

fn plot_confusion(visuals: &Visuals, run: &RunInfo, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let codebook: Vec<u8> = (0..6).collect();
    let mut predicted = Vec::new();
    let mut actual = Vec::new();
    for _ in 0..5 {
        let labels: Vec<u8> = (0..80).map(|_| rng.random_range(0..6)).collect();
        let guesses: Vec<u8> = labels
            .iter()
            .map(|&label| match rng.random_range(0..10) {
                0 => u8::MAX,
                1 => rng.random_range(0..6),
                _ => label,
            })
            .collect();
        actual.push(labels);
        predicted.push(guesses);
    }
    let figures = visuals.confusion_matrix(&predicted, &actual, &codebook, run)?;
    info!("row-normalised confusion matrix:\n{}", figures.normalized);
    Ok(())
}

fn plot_codewords(
    incremental: &IncrementalLearningVisuals,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let prototypes: Vec<Vec<u8>> = (0..8)
        .map(|_| (0..CODEWORD_LEN).map(|_| rng.random_range(0..2)).collect())
        .collect();
    let words: Vec<Vec<u8>> = (0..150)
        .map(|_| {
            let mut word = prototypes[rng.random_range(0..prototypes.len())].clone();
            // Occasional single-bit flip.
            if rng.random_bool(0.2) {
                let bit = rng.random_range(0..CODEWORD_LEN);
                word[bit] ^= 1;
            }
            word
        })
        .collect();
    let chosen = &prototypes[0];
    incremental.codeword_frequency(&words, chosen, 0.64)?;
    incremental.codeword_frequency_top_five(&words, chosen, 0.64)?;
    incremental.bit_frequency(&words, 0.64)?;
    Ok(())
}

/// Cumulative mean error of a process that errs with probability `p`.
fn cumulative_error(rng: &mut StdRng, start: usize, len: usize, p: f64) -> (Vec<f64>, Vec<f64>) {
    let mut errors = 0.0;
    (0..len)
        .map(|i| {
            if rng.random_bool(p) {
                errors += 1.0;
            }
            ((start + i) as f64, errors / (i + 1) as f64)
        })
        .unzip()
}

fn plot_errors(
    visuals: &Visuals,
    incremental: &IncrementalLearningVisuals,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let (time, unknown) = cumulative_error(rng, 0, 200, 0.3);
    let (_, known_detection) = cumulative_error(rng, 0, 200, 0.15);
    let (_, known_classification) = cumulative_error(rng, 0, 200, 0.1);
    visuals.error_over_time(&time, &unknown, &known_detection, &known_classification)?;
    incremental.error_over_time_three(&time, &unknown, &known_detection, &known_classification)?;

    let phases: Vec<ErrorPhaseCurves> = SPLITS
        .iter()
        .map(|&split| {
            let (reinforcement_time, reinforcement_error) =
                cumulative_error(rng, 0, 100, 0.2 + split / 2.0);
            let (testing_time, testing_error) = cumulative_error(rng, 100, 100, 0.1 + split / 4.0);
            ErrorPhaseCurves {
                split,
                reinforcement_std: vec![0.04; reinforcement_error.len()],
                testing_std: vec![0.03; testing_error.len()],
                reinforcement_time,
                reinforcement_error,
                testing_time,
                testing_error,
            }
        })
        .collect();
    incremental.error_over_time_splits(&phases)?;
    Ok(())
}
