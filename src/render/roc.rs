//! ROC curves with the chosen operating point.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::StyleConfig;
use crate::error::Result;
use crate::render::Plot;
use crate::render::primitives::{
    FONT, LegendCorner, LegendMarker, LinePattern, draw_inside_legend, draw_patterned_path,
    draw_title, legend_only,
};

#[derive(Debug, Clone)]
pub struct RocCurve {
    pub label: Option<String>,
    /// (fpr, tpr) in integration order, see [`crate::core::roc::roc_points`].
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    /// Best operating point as (fpr, tpr).
    pub best: (f64, f64),
    pub best_label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RocPlot {
    pub title: String,
    pub curves: Vec<RocCurve>,
}

impl Plot for RocPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;

        let mut chart = ChartBuilder::on(&body)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc("False Positive Rate")
            .y_desc("True Positive Rate")
            .x_labels(6)
            .y_labels(6)
            .label_style((FONT, style.label_font_size))
            .draw()?;

        draw_patterned_path(
            &mut chart,
            &[(0.0, 0.0), (1.0, 1.0)],
            LinePattern::Dashed,
            BLACK.stroke_width(1),
        )?;

        let mut labelled = false;
        for curve in &self.curves {
            chart.draw_series(LineSeries::new(
                curve.points.iter().copied(),
                curve.color.stroke_width(2),
            ))?;
            if let Some(label) = &curve.label {
                legend_only(&mut chart, label, curve.color, LegendMarker::Line(LinePattern::Solid))?;
                labelled = true;
            }
        }
        // Best points go on top of every curve.
        for curve in &self.curves {
            chart.draw_series(std::iter::once(Circle::new(curve.best, 6, RED.filled())))?;
            if let Some(label) = &curve.best_label {
                legend_only(&mut chart, label, RED, LegendMarker::Point)?;
                labelled = true;
            }
        }

        if labelled {
            draw_inside_legend(&mut chart, LegendCorner::LowerRight, style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_of_three_lengths_draws() {
        let colors = [GREEN, BLUE, BLACK];
        let curves = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| RocCurve {
                label: Some(format!("{}c Codeword Length", 1.0 + 0.5 * i as f64)),
                points: vec![(0.0, 0.1), (0.3, 0.6), (1.0, 1.0)],
                color,
                best: (0.3, 0.6),
                best_label: (i == 0).then(|| "Avg. Optimal Threshold".to_string()),
            })
            .collect();
        let plot = RocPlot {
            title: "ROC".into(),
            curves,
        };
        let mut buf = vec![0u8; 500 * 500 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (500, 500)).into_drawing_area();
            plot.draw(&root, &StyleConfig::default()).unwrap();
            root.present().unwrap();
        }
        // Some pixel is pure red from the best point marker.
        assert!(buf.chunks(3).any(|px| px == [255, 0, 0]));
    }
}
