//! Classifier identities used in titles and file names.

use std::fmt;

use crate::error::{Result, VisualsError};

/// Classifier that produced the predictions being plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierModel {
    Svm,
    DecisionTree,
    Lda,
    Knn,
    LogisticRegression,
    NeuralNetwork,
    NaiveBayes,
    RandomForest,
    KMeansClustering,
    OneClassSvm,
}

impl ClassifierModel {
    pub const ALL: [ClassifierModel; 10] = [
        ClassifierModel::Svm,
        ClassifierModel::DecisionTree,
        ClassifierModel::Lda,
        ClassifierModel::Knn,
        ClassifierModel::LogisticRegression,
        ClassifierModel::NeuralNetwork,
        ClassifierModel::NaiveBayes,
        ClassifierModel::RandomForest,
        ClassifierModel::KMeansClustering,
        ClassifierModel::OneClassSvm,
    ];

    /// Map the experiment driver's 1-based classifier number.
    pub fn from_selector(selector: usize) -> Result<Self> {
        selector
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(VisualsError::InvalidSelector(selector))
    }

    pub fn selector(self) -> usize {
        Self::ALL
            .iter()
            .position(|&m| m == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ClassifierModel::Svm => "SVM",
            ClassifierModel::DecisionTree => "DT",
            ClassifierModel::Lda => "LDA",
            ClassifierModel::Knn => "KNN",
            ClassifierModel::LogisticRegression => "LogisticRegression",
            ClassifierModel::NeuralNetwork => "NeuralNetwork",
            ClassifierModel::NaiveBayes => "NaiveBayes",
            ClassifierModel::RandomForest => "Random Forest",
            ClassifierModel::KMeansClustering => "KMeansClustering",
            ClassifierModel::OneClassSvm => "OneClassSVM",
        }
    }
}

impl fmt::Display for ClassifierModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<usize> for ClassifierModel {
    type Error = VisualsError;

    fn try_from(selector: usize) -> Result<Self> {
        Self::from_selector(selector)
    }
}
