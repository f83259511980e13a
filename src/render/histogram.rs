//! Minimum-Hamming-distance histograms with a threshold marker.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::StyleConfig;
use crate::core::format::format_number;
use crate::core::histogram::{HAMMING_BINS, hamming_histogram, max_bin_count};
use crate::error::Result;
use crate::render::Plot;
use crate::render::primitives::{
    FONT, LegendCorner, LegendEntry, LegendMarker, LinePattern, XyChart, draw_inside_legend,
    draw_side_legend, draw_title, draw_vertical_marker, legend_only, split_legend_column,
};

/// One set of distances drawn as unit-width bars.
#[derive(Debug, Clone)]
pub struct DistanceLayer<'a> {
    pub distances: &'a [u32],
    pub label: String,
    pub color: RGBColor,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPlacement {
    /// Column to the right of the plot area.
    Outside,
    UpperRight,
}

#[derive(Debug, Clone)]
pub struct HammingHistogramPlot<'a> {
    pub title: String,
    pub layers: Vec<DistanceLayer<'a>>,
    pub threshold: f64,
    pub legend: LegendPlacement,
}

impl HammingHistogramPlot<'_> {
    fn threshold_label(&self) -> String {
        format!("Optimal Threshold: {}", format_number(self.threshold))
    }
}

impl Plot for HammingHistogramPlot<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;
        let (plot_area, legend_area) = match self.legend {
            LegendPlacement::Outside => {
                let (p, l) = split_legend_column(&body, style);
                (p, Some(l))
            }
            LegendPlacement::UpperRight => (body, None),
        };

        let histograms: Vec<Vec<(u32, usize)>> = self
            .layers
            .iter()
            .map(|layer| hamming_histogram(layer.distances))
            .collect();
        let refs: Vec<&[(u32, usize)]> = histograms.iter().map(Vec::as_slice).collect();
        let y_max = (max_bin_count(&refs) as f64 * 1.1).max(1.0);
        let x_range = -0.5..(HAMMING_BINS as f64 - 0.5);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Minimum Hamming Distance")
            .y_desc("Frequency")
            .x_labels(HAMMING_BINS as usize)
            .x_label_formatter(&|x| integer_label(*x))
            .label_style((FONT, style.label_font_size))
            .draw()?;

        for (layer, hist) in self.layers.iter().zip(&histograms) {
            draw_bars(&mut chart, hist, layer.color.mix(layer.alpha).filled())?;
            if legend_area.is_none() {
                legend_only(&mut chart, &layer.label, layer.color, LegendMarker::Bar)?;
            }
        }

        let marker_style = RED.stroke_width(3);
        draw_vertical_marker(
            &mut chart,
            self.threshold,
            (0.0, y_max),
            LinePattern::Dashed,
            marker_style,
        )?;

        match legend_area {
            Some(area) => {
                let mut entries: Vec<LegendEntry> = self
                    .layers
                    .iter()
                    .map(|l| LegendEntry::new(l.label.clone(), l.color, LegendMarker::Bar))
                    .collect();
                entries.push(LegendEntry::new(
                    self.threshold_label(),
                    RED,
                    LegendMarker::Line(LinePattern::Dashed),
                ));
                draw_side_legend(&area, &entries, style)?;
            }
            None => {
                legend_only(
                    &mut chart,
                    &self.threshold_label(),
                    RED,
                    LegendMarker::Line(LinePattern::Dashed),
                )?;
                draw_inside_legend(&mut chart, LegendCorner::UpperRight, style)?;
            }
        }
        Ok(())
    }
}

fn draw_bars<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    hist: &[(u32, usize)],
    fill: ShapeStyle,
) -> Result<()> {
    let bars = hist.iter().filter(|(_, n)| *n > 0).map(|&(d, n)| {
        let x = d as f64;
        [(x - 0.5, 0.0), (x + 0.5, n as f64)]
    });
    let bars: Vec<[(f64, f64); 2]> = bars.collect();
    chart.draw_series(bars.iter().map(|r| Rectangle::new(*r, fill)))?;
    chart.draw_series(
        bars.iter()
            .map(|r| Rectangle::new(*r, BLACK.stroke_width(1))),
    )?;
    Ok(())
}

fn integer_label(x: f64) -> String {
    if (x - x.round()).abs() < 1e-6 && x >= 0.0 {
        format!("{}", x.round() as i64)
    } else {
        String::new()
    }
}
