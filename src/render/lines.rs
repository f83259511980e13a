//! Line plots: accuracy per split and error over time.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::StyleConfig;
use crate::core::format::format_rounded;
use crate::core::series::value_bounds;
use crate::error::Result;
use crate::render::Plot;
use crate::render::primitives::{
    FONT, LegendCorner, LegendEntry, LegendMarker, LinePattern, XyChart, draw_inside_legend,
    draw_labeled_guides, draw_patterned_path, draw_side_legend, draw_title, legend_only,
    padded_range, split_legend_column,
};

/// One polyline with its legend label and stroke.
#[derive(Debug, Clone)]
pub struct Curve {
    /// `None` draws the line without a legend entry.
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub pattern: LinePattern,
    pub markers: bool,
}

impl Curve {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            label: Some(label.into()),
            points,
            color,
            pattern: LinePattern::Solid,
            markers: false,
        }
    }

    pub fn unlabeled(points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            label: None,
            points,
            color,
            pattern: LinePattern::Solid,
            markers: false,
        }
    }

    pub fn pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    fn legend_marker(&self) -> LegendMarker {
        if self.markers {
            LegendMarker::LinePoint(self.pattern)
        } else {
            LegendMarker::Line(self.pattern)
        }
    }

    fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

/// Shaded `[lower, upper]` region along `x`.
#[derive(Debug, Clone)]
pub struct Band {
    pub x: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub color: RGBColor,
}

impl Band {
    fn polygon(&self) -> Vec<(f64, f64)> {
        let upper = self.x.iter().copied().zip(self.upper.iter().copied());
        let lower = self.x.iter().copied().zip(self.lower.iter().copied());
        let mut outline: Vec<(f64, f64)> = upper.collect();
        let mut back: Vec<(f64, f64)> = lower.collect();
        back.reverse();
        outline.extend(back);
        outline
    }
}

fn draw_curve<DB: DrawingBackend>(chart: &mut XyChart<'_, DB>, curve: &Curve) -> Result<()> {
    draw_patterned_path(
        chart,
        &curve.points,
        curve.pattern,
        curve.color.stroke_width(2),
    )?;
    if curve.markers {
        let fill = curve.color.filled();
        chart.draw_series(curve.points.iter().map(|&p| Circle::new(p, 4, fill)))?;
    }
    Ok(())
}

fn x_bounds<'a>(curves: impl IntoIterator<Item = &'a Curve>, extra: &[f64]) -> (f64, f64) {
    let xs: Vec<f64> = curves
        .into_iter()
        .flat_map(|c| c.points.iter().map(|p| p.0))
        .chain(extra.iter().copied())
        .collect();
    let (lo, hi) = value_bounds([xs.as_slice()]).unwrap_or((0.0, 1.0));
    let pad = if hi - lo > 1e-9 { 0.05 * (hi - lo) } else { 0.05 };
    (lo - pad, hi + pad)
}

/// Accuracy against the unknown split, y fixed to [0, 1], legend on the right.
#[derive(Debug, Clone)]
pub struct AccuracyCurvePlot {
    pub title: String,
    pub curves: Vec<Curve>,
    /// X positions that get a labelled guide.
    pub ticks: Vec<f64>,
}

impl Plot for AccuracyCurvePlot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;
        let (plot_area, legend_area) = split_legend_column(&body, style);

        let (x_lo, x_hi) = x_bounds(&self.curves, &self.ticks);
        let y_range = (-0.02, 1.02);
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Percent Unknown")
            .y_desc("Accuracy")
            .x_label_formatter(&|_| String::new())
            .y_labels(11)
            .y_label_formatter(&|y| format!("{y:.1}"))
            .label_style((FONT, style.label_font_size))
            .draw()?;

        draw_labeled_guides(&mut chart, &self.ticks, y_range, style.label_font_size)?;
        for curve in &self.curves {
            draw_curve(&mut chart, curve)?;
        }

        let entries: Vec<LegendEntry> = self
            .curves
            .iter()
            .filter_map(|c| {
                c.label
                    .as_ref()
                    .map(|label| LegendEntry::new(label.clone(), c.color, c.legend_marker()))
            })
            .collect();
        draw_side_legend(&legend_area, &entries, style)?;
        Ok(())
    }
}

/// Curves over time with an optional shaded band per curve and an inside legend.
#[derive(Debug, Clone)]
pub struct TimeSeriesPlot {
    pub title: Option<String>,
    pub y_desc: String,
    pub curves: Vec<Curve>,
    pub bands: Vec<Band>,
    pub legend: LegendCorner,
}

impl Plot for TimeSeriesPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, self.title.as_deref().unwrap_or(""), style)?;

        let ys: Vec<Vec<f64>> = self
            .curves
            .iter()
            .map(Curve::ys)
            .chain(
                self.bands
                    .iter()
                    .flat_map(|b| [b.upper.clone(), b.lower.clone()]),
            )
            .collect();
        let (y_lo, y_hi) = padded_range(value_bounds(ys.iter().map(Vec::as_slice)));
        let (x_lo, x_hi) = x_bounds(&self.curves, &[]);

        let mut chart = ChartBuilder::on(&body)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc(self.y_desc.as_str())
            .y_label_formatter(&|y| format_rounded(*y, 3))
            .label_style((FONT, style.label_font_size))
            .draw()?;

        for band in &self.bands {
            chart.draw_series(std::iter::once(Polygon::new(
                band.polygon(),
                band.color.mix(0.3).filled(),
            )))?;
        }
        for curve in &self.curves {
            draw_curve(&mut chart, curve)?;
            if let Some(label) = &curve.label {
                legend_only(&mut chart, label, curve.color, curve.legend_marker())?;
            }
        }

        if self.curves.iter().any(|c| c.label.is_some()) {
            draw_inside_legend(&mut chart, self.legend, style)?;
        }
        Ok(())
    }
}
