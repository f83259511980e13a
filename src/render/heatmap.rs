//! Annotated confusion-matrix heatmap, laid out in pixel space.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::StyleConfig;
use crate::core::confusion::ConfusionMatrix;
use crate::core::format::format_rounded;
use crate::error::Result;
use crate::render::Plot;
use crate::render::primitives::{FONT, contrast_text, draw_title, heat_color};

const COLORBAR_STEPS: i32 = 64;

#[derive(Debug, Clone)]
pub struct ConfusionHeatmapPlot<'a> {
    pub title: String,
    pub matrix: &'a ConfusionMatrix,
}

/// Tick label for row/column `index`; the last index is the unknown class.
pub fn class_label(index: usize, size: usize) -> String {
    if index + 1 == size {
        "?".to_string()
    } else {
        index.to_string()
    }
}

/// Integral counts print bare, rates keep two decimals.
fn cell_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format_rounded(value, 2)
    }
}

impl Plot for ConfusionHeatmapPlot<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;
        let (w, h) = body.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        let n = self.matrix.size().max(1) as i32;

        let margin_left = 110;
        let margin_right = 150;
        let margin_top = 20;
        let margin_bottom = 100;
        let cell_w = ((w - margin_left - margin_right) / n).max(1);
        let cell_h = ((h - margin_top - margin_bottom) / n).max(1);
        let grid_right = margin_left + cell_w * n;
        let grid_bottom = margin_top + cell_h * n;

        let max = self.matrix.max_value();
        let scale = |v: f64| if max > 0.0 { v / max } else { 0.0 };
        let cell_font = (cell_w.min(cell_h) / 4).clamp(10, 40) as u32;
        let centered = Pos::new(HPos::Center, VPos::Center);

        for (row, values) in self.matrix.matrix().iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                let x0 = margin_left + col as i32 * cell_w;
                let y0 = margin_top + row as i32 * cell_h;
                let t = scale(value);
                body.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                    heat_color(t).filled(),
                ))?;
                body.draw(&Text::new(
                    cell_text(value),
                    (x0 + cell_w / 2, y0 + cell_h / 2),
                    (FONT, cell_font)
                        .into_font()
                        .color(&contrast_text(t))
                        .pos(centered),
                ))?;
            }
        }
        body.draw(&Rectangle::new(
            [(margin_left, margin_top), (grid_right, grid_bottom)],
            BLACK.stroke_width(1),
        ))?;

        let size = self.matrix.size();
        let tick_font = (FONT, style.label_font_size)
            .into_font()
            .color(&BLACK);
        for i in 0..size {
            let label = class_label(i, size);
            let cx = margin_left + i as i32 * cell_w + cell_w / 2;
            let cy = margin_top + i as i32 * cell_h + cell_h / 2;
            body.draw(&Text::new(
                label.clone(),
                (cx, grid_bottom + 8),
                tick_font.clone().pos(Pos::new(HPos::Center, VPos::Top)),
            ))?;
            body.draw(&Text::new(
                label,
                (margin_left - 10, cy),
                tick_font.clone().pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
        }

        let desc_font = (FONT, style.caption_font_size).into_font().color(&BLACK);
        body.draw(&Text::new(
            "Predictions",
            ((margin_left + grid_right) / 2, grid_bottom + 50),
            desc_font.clone().pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
        body.draw(&Text::new(
            "True Values",
            (30, (margin_top + grid_bottom) / 2),
            desc_font
                .transform(FontTransform::Rotate270)
                .pos(centered),
        ))?;

        draw_colorbar(&body, (grid_right + 40, margin_top, grid_bottom), max, style)?;
        Ok(())
    }
}

/// Vertical colour ramp from `max` at the top to 0 at the bottom.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (x, top, bottom): (i32, i32, i32),
    max: f64,
    style: &StyleConfig,
) -> Result<()> {
    let width = 28;
    let span = (bottom - top).max(1);
    for step in 0..COLORBAR_STEPS {
        let y0 = top + span * step / COLORBAR_STEPS;
        let y1 = top + span * (step + 1) / COLORBAR_STEPS;
        let t = 1.0 - (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        area.draw(&Rectangle::new(
            [(x, y0), (x + width, y1)],
            heat_color(t).filled(),
        ))?;
    }
    area.draw(&Rectangle::new(
        [(x, top), (x + width, bottom)],
        BLACK.stroke_width(1),
    ))?;

    let font = (FONT, style.label_font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    area.draw(&Text::new(cell_text(max), (x + width + 6, top), font.clone()))?;
    area.draw(&Text::new("0", (x + width + 6, bottom), font))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_class_is_unknown() {
        assert_eq!(class_label(0, 3), "0");
        assert_eq!(class_label(1, 3), "1");
        assert_eq!(class_label(2, 3), "?");
    }

    #[test]
    fn cell_text_formats_counts_and_rates() {
        assert_eq!(cell_text(12.0), "12");
        assert_eq!(cell_text(0.333), "0.33");
        assert_eq!(cell_text(0.5), "0.5");
    }

    #[test]
    fn heatmap_draws_every_cell() {
        let cm = ConfusionMatrix::accumulate(
            &[vec![0, 1, 9]],
            &[vec![0, 1, 1]],
            &[0, 1],
        )
        .unwrap();
        let plot = ConfusionHeatmapPlot {
            title: "Confusion Matrix".into(),
            matrix: &cm,
        };
        let mut buf = vec![0u8; 600 * 500 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (600, 500)).into_drawing_area();
            plot.draw(&root, &StyleConfig::default()).unwrap();
            root.present().unwrap();
        }
        let darkest = heat_color(1.0);
        assert!(
            buf.chunks(3)
                .any(|px| px == [darkest.0, darkest.1, darkest.2])
        );
    }
}
