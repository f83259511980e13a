//! Bar charts over categorical x: codeword counts and per-bit frequencies.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::full_palette::PURPLE;

use crate::config::StyleConfig;
use crate::core::codeword::BitCount;
use crate::error::Result;
use crate::render::Plot;
use crate::render::primitives::{
    FONT, LegendEntry, LegendMarker, draw_side_legend, draw_title, split_legend_column,
};

const BIT_BAR_WIDTH: f64 = 0.2;

/// Label for the segment centred on a category; segment edges stay blank.
fn category_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn integer_tick(y: f64) -> String {
    if y.fract().abs() < 1e-9 {
        format!("{}", y as i64)
    } else {
        String::new()
    }
}

/// Counts of distinct codewords, one bar each.
#[derive(Debug, Clone)]
pub struct CodewordBarPlot {
    pub title: String,
    pub bars: Vec<(String, usize)>,
    /// Turn tick labels sideways when there are many bars.
    pub rotate_labels: bool,
}

impl Plot for CodewordBarPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;

        let n = self.bars.len().max(1);
        let max = self.bars.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
        let labels: Vec<String> = self.bars.iter().map(|(k, _)| k.clone()).collect();
        let label_font = if self.rotate_labels {
            (FONT, (style.label_font_size * 2 / 3).max(8))
                .into_font()
                .transform(FontTransform::Rotate90)
        } else {
            (FONT, style.label_font_size).into_font()
        };
        let x_area = if self.rotate_labels { 110 } else { 45 };

        // One segment per codeword so every bar gets its own tick label.
        let mut chart = ChartBuilder::on(&body)
            .margin(15)
            .x_label_area_size(x_area)
            .y_label_area_size(60)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..(max as f64 * 1.1))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Codeword")
            .y_desc("Frequency")
            .x_labels(n + 1)
            .x_label_formatter(&|v| category_label(v, &labels))
            .x_label_style(label_font)
            .y_labels((max + 1).min(11))
            .y_label_formatter(&|y| integer_tick(*y))
            .label_style((FONT, style.label_font_size))
            .draw()?;

        let rects: Vec<[(SegmentValue<usize>, f64); 2]> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, (_, count))| {
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *count as f64),
                ]
            })
            .collect();
        let bar = |corners: [(SegmentValue<usize>, f64); 2], style: ShapeStyle| {
            let mut rect = Rectangle::new(corners, style);
            rect.set_margin(0, 0, 6, 6);
            rect
        };
        chart.draw_series(rects.iter().map(|r| bar(r.clone(), BLUE.filled())))?;
        chart.draw_series(rects.iter().map(|r| bar(r.clone(), BLACK.stroke_width(1))))?;
        Ok(())
    }
}

/// Grouped bars of zeros and ones at each codeword index.
#[derive(Debug, Clone)]
pub struct BitFrequencyPlot {
    pub title: String,
    pub counts: Vec<BitCount>,
}

impl Plot for BitFrequencyPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &StyleConfig,
    ) -> Result<()> {
        root.fill(&WHITE)?;
        let body = draw_title(root, &self.title, style)?;
        let (plot_area, legend_area) = split_legend_column(&body, style);

        let n = self.counts.len().max(1);
        let max = self
            .counts
            .iter()
            .map(|c| c.zeros.max(c.ones))
            .max()
            .unwrap_or(0)
            .max(1);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5 + BIT_BAR_WIDTH), 0.0..(max as f64 * 1.1))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Codeword Index")
            .y_desc("Frequency")
            .x_labels(n + 1)
            .x_label_formatter(&|x| {
                if (x - x.round()).abs() < 1e-6 && *x >= 0.0 && (x.round() as usize) < n {
                    format!("{}", x.round() as usize)
                } else {
                    String::new()
                }
            })
            .y_labels((max + 1).min(11))
            .y_label_formatter(&|y| integer_tick(*y))
            .label_style((FONT, style.label_font_size))
            .draw()?;

        let half = BIT_BAR_WIDTH / 2.0;
        chart.draw_series(self.counts.iter().enumerate().map(|(i, c)| {
            let x = i as f64;
            Rectangle::new(
                [(x - half, 0.0), (x + half, c.zeros as f64)],
                PURPLE.filled(),
            )
        }))?;
        chart.draw_series(self.counts.iter().enumerate().map(|(i, c)| {
            let x = i as f64 + BIT_BAR_WIDTH;
            Rectangle::new(
                [(x - half, 0.0), (x + half, c.ones as f64)],
                GREEN.filled(),
            )
        }))?;

        draw_side_legend(
            &legend_area,
            &[
                LegendEntry::new("0's", PURPLE, LegendMarker::Bar),
                LegendEntry::new("1's", GREEN, LegendMarker::Bar),
            ],
            style,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<P: Plot>(plot: &P) -> Vec<u8> {
        let mut buf = vec![0u8; 640 * 480 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (640, 480)).into_drawing_area();
            plot.draw(&root, &StyleConfig::default()).unwrap();
            root.present().unwrap();
        }
        buf
    }

    #[test]
    fn category_labels_sit_on_segment_centres() {
        let labels = vec!["101".to_string(), "011".to_string()];
        assert_eq!(category_label(&SegmentValue::CenterOf(0), &labels), "101");
        assert_eq!(category_label(&SegmentValue::CenterOf(1), &labels), "011");
        assert_eq!(category_label(&SegmentValue::Exact(1), &labels), "");
        assert_eq!(category_label(&SegmentValue::CenterOf(2), &labels), "");
        assert_eq!(category_label(&SegmentValue::Last, &labels), "");
    }

    #[test]
    fn every_codeword_gets_a_tick() {
        let n = 37;
        let labels: Vec<String> = (0..n).map(|i| format!("{i:06b}")).collect();
        let axis = (0..n).into_segmented();
        let ticks: Vec<String> = axis
            .key_points(n + 1)
            .iter()
            .map(|v| category_label(v, &labels))
            .filter(|label| !label.is_empty())
            .collect();
        assert_eq!(ticks, labels);
    }

    #[test]
    fn many_codeword_bars_draw() {
        let plot = CodewordBarPlot {
            title: "Codeword Frequency".into(),
            bars: (0..40).map(|i| (format!("{i:06b}"), i % 7 + 1)).collect(),
            rotate_labels: true,
        };
        let buf = render(&plot);
        assert!(buf.chunks(3).any(|px| px == [BLUE.0, BLUE.1, BLUE.2]));
    }

    #[test]
    fn y_ticks_are_whole_numbers() {
        assert_eq!(integer_tick(3.0), "3");
        assert_eq!(integer_tick(2.5), "");
    }

    #[test]
    fn codeword_bars_draw_rotated() {
        let plot = CodewordBarPlot {
            title: "Codeword Frequency".into(),
            bars: vec![("101".into(), 3), ("011".into(), 1), ("111".into(), 2)],
            rotate_labels: true,
        };
        let buf = render(&plot);
        assert!(buf.chunks(3).any(|px| px == [BLUE.0, BLUE.1, BLUE.2]));
    }

    #[test]
    fn bit_frequency_draws_both_colours() {
        let plot = BitFrequencyPlot {
            title: "Index Bit Frequency".into(),
            counts: vec![
                BitCount { zeros: 1, ones: 1 },
                BitCount { zeros: 2, ones: 0 },
            ],
        };
        let buf = render(&plot);
        assert!(buf.chunks(3).any(|px| px == [PURPLE.0, PURPLE.1, PURPLE.2]));
        assert!(buf.chunks(3).any(|px| px == [GREEN.0, GREEN.1, GREEN.2]));
    }
}
