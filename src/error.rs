//! Error type shared by the numeric helpers and the renderers.

use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VisualsError>;

#[derive(Debug, Error)]
pub enum VisualsError {
    #[error("{what} is empty")]
    EmptyInput { what: &'static str },

    #[error("{what}: length mismatch ({left} vs {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("actual label at position {index} is not part of the codebook")]
    UnknownLabel { index: usize },

    #[error("codeword {index} has {found} bits, expected {expected}")]
    InconsistentCodewordLength {
        expected: usize,
        found: usize,
        index: usize,
    },

    #[error("classifier selector {0} is out of range (expected 1..=10)")]
    InvalidSelector(usize),

    #[error("no known data left after removing unknown samples")]
    NoKnownData,

    #[error("output directory {path} is not usable: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("render failed: {0}")]
    Render(String),

    #[error("config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for VisualsError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        VisualsError::Render(err.to_string())
    }
}

/// Reject an empty slice with a named error.
pub(crate) fn ensure_non_empty<T>(values: &[T], what: &'static str) -> Result<()> {
    if values.is_empty() {
        return Err(VisualsError::EmptyInput { what });
    }
    Ok(())
}

/// Reject paired slices whose lengths differ.
pub(crate) fn ensure_same_len<A, B>(left: &[A], right: &[B], what: &'static str) -> Result<()> {
    if left.len() != right.len() {
        return Err(VisualsError::LengthMismatch {
            what,
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message_names_both_sides() {
        let err = ensure_same_len(&[1, 2, 3], &[1.0], "fpr/tpr").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fpr/tpr"));
        assert!(msg.contains("3 vs 1"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let empty: [u32; 0] = [];
        assert!(matches!(
            ensure_non_empty(&empty, "known distances"),
            Err(VisualsError::EmptyInput { what: "known distances" })
        ));
        assert!(ensure_non_empty(&[0u32], "known distances").is_ok());
    }
}
