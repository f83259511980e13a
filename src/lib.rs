//! Diagnostic figures for Hamming-distance anomaly detection experiments.
//!
//! [`Visuals`] draws the general experiment figures and
//! [`IncrementalLearningVisuals`] the incremental-learning ones. Both write
//! image files into [`RenderConfig::output_dir`]. The numeric helpers under
//! [`core`] are usable without drawing anything.

pub mod config;
pub mod core;
pub mod error;
pub mod render;

pub use config::{ImageFormat, RenderConfig};
pub use error::{Result, VisualsError};
pub use render::incremental::IncrementalLearningVisuals;
pub use render::visuals::Visuals;
