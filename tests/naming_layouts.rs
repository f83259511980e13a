use anomaly_graphs::VisualsError;
use anomaly_graphs::core::model::ClassifierModel;
use anomaly_graphs::core::naming::{
    ConfusionKind, RunInfo, ThresholdStage, accuracy_stem, bit_frequency_stem,
    codeword_frequency_stem, confusion_stem, holdout_stem, means_only_accuracy_stem,
    reinforced_accuracy_stem, roc_stem, single_data_holdout_stem, threshold_histogram_stem,
    training_fraction,
};

fn run() -> RunInfo {
    RunInfo::new(ClassifierModel::RandomForest, 4, 20)
        .holdout(1)
        .split(0.5)
        .threshold(6.5)
        .seed(3)
        .known_holdout_samples(25)
        .training_fraction(0.8)
        .percent_known_classes(60.0)
}

#[test]
fn training_fraction_rounds_to_two_places() {
    assert_eq!(training_fraction(2, 10, 4).unwrap(), 0.33);
    assert_eq!(training_fraction(6, 10, 2).unwrap(), 0.75);
    // 1/8 is an exact tie and goes to the even digit.
    assert_eq!(training_fraction(1, 8, 0).unwrap(), 0.12);
    assert!(matches!(
        training_fraction(1, 5, 5),
        Err(VisualsError::NoKnownData)
    ));
}

#[test]
fn testing_threshold_layout() {
    assert_eq!(
        threshold_histogram_stem(ThresholdStage::Testing, &run()),
        "_TestingThreshold_Random Forest_CB4_CWLength(20)_Holdout1_Split0.5_Threshold6.5\
         _UnknownHoldoutClasses1_KnownHoldoutSamples25_PercentTrainingData0.8"
    );
}

#[test]
fn holdout_and_single_data_layouts() {
    assert_eq!(holdout_stem(&run()), "1_0.5_6.5_4_Random Forest");
    assert_eq!(
        single_data_holdout_stem(&run()),
        "SingleData_1_0.5_6.5_4_Random Forest"
    );
}

#[test]
fn accuracy_layouts() {
    let full = accuracy_stem(&run());
    let reinforced = reinforced_accuracy_stem(&run());
    assert!(full.ends_with("_PercentKnownClasses60.0"));
    assert!(full.starts_with(&reinforced));
    assert_eq!(
        reinforced,
        "Random Forest_CB4_CWLength(20)_UnknownHoldoutClasses1_KnownHoldoutSamples25\
         _PercentTrainingData0.8"
    );
}

#[test]
fn means_only_layout_does_not_collide_with_min_max() {
    let means = means_only_accuracy_stem(&run());
    assert_ne!(means, accuracy_stem(&run()));
    assert_eq!(
        means,
        "MeansOnly_Random Forest_CB4_CWLength(20)_UnknownHoldoutClasses1_KnownHoldoutSamples25\
         _PercentTrainingData0.8_PercentKnownClasses60.0"
    );
}

#[test]
fn roc_and_confusion_layouts() {
    assert_eq!(roc_stem(&run()), "Random Forest_CB4_CWLength(20)_Split(0.5)");
    assert_eq!(
        confusion_stem(ConfusionKind::Original, &run()),
        "_Original_Random Forest_CB4_CWLength(20)_Split(0.5)"
    );
    assert_eq!(
        confusion_stem(ConfusionKind::Averaged, &run()),
        "_Averaged_Random Forest_CB4_CWLength(20)_Split(0.5)"
    );
}

#[test]
fn display_only_layouts_are_descriptive() {
    assert_eq!(
        codeword_frequency_stem(&[1, 0, 1], false),
        "CodewordFrequency_101"
    );
    assert_eq!(
        codeword_frequency_stem(&[1, 0, 1], true),
        "CodewordFrequencyTopFive_101"
    );
    assert_eq!(bit_frequency_stem(8, 40), "BitFrequency_CWLength(8)_Samples40");
}
