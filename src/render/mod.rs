//! Plot definitions and the renderers that write them to disk.
//!
//! Every plot draws onto an explicit [`DrawingArea`] handed to it, so there is
//! no shared canvas between calls. [`figure::Figure`] owns backend selection
//! and file output.

pub mod bars;
pub mod figure;
pub mod heatmap;
pub mod histogram;
pub mod incremental;
pub mod lines;
pub mod primitives;
pub mod roc;
pub mod visuals;

use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};

use crate::config::StyleConfig;
use crate::error::Result;

/// A figure that can be drawn onto any plotters backend.
pub trait Plot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()>;
}
