//! Drawing helpers shared by every plot: titles, legends, dashed paths, guides.

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::element::{DashedPathElement, DottedPathElement};
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, DottedLineSeries};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::StyleConfig;
use crate::error::Result;

pub type XyChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub const FONT: &str = "sans-serif";

const DASH: i32 = 10;
const DASH_GAP: i32 = 6;
const DOT_GAP: i32 = 5;
const DOT_RADIUS: i32 = 1;

/// Stroke pattern for a line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    Solid,
    Dashed,
    Dotted,
}

impl LinePattern {
    /// Solid, dashed, dotted, then around again.
    pub fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => LinePattern::Solid,
            1 => LinePattern::Dashed,
            _ => LinePattern::Dotted,
        }
    }
}

/// How a legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMarker {
    Line(LinePattern),
    /// Line with a point marker, as used for accuracy curves.
    LinePoint(LinePattern),
    Bar,
    Point,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    pub marker: LegendMarker,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: RGBColor, marker: LegendMarker) -> Self {
        Self {
            label: label.into(),
            color,
            marker,
        }
    }
}

/// Corner for a legend drawn inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
    LowerRight,
}

impl LegendCorner {
    fn position(self) -> SeriesLabelPosition {
        match self {
            LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
            LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Draw a multi-line title across the top of `area` and return the area below it.
pub fn draw_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    style: &StyleConfig,
) -> Result<DrawingArea<DB, Shift>> {
    let font_size = style.caption_font_size;
    let line_height = (font_size as f64 * 1.3).round() as i32;
    let (w, _) = area.dim_in_pixel();
    let text_style = (FONT, font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    let mut y = 8;
    for line in title.lines() {
        area.draw(&Text::new(
            line.trim().to_string(),
            (w as i32 / 2, y),
            text_style.clone(),
        ))?;
        y += line_height;
    }
    let (_, body) = area.split_vertically(y + 4);
    Ok(body)
}

/// Split off a legend column on the right; returns (plot, legend).
pub fn split_legend_column<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &StyleConfig,
) -> (DrawingArea<DB, Shift>, DrawingArea<DB, Shift>) {
    let (w, _) = area.dim_in_pixel();
    let fraction = style.legend_fraction.clamp(0.05, 0.6) as f64;
    let plot_width = (w as f64 * (1.0 - fraction)).round() as u32;
    area.split_horizontally(plot_width)
}

/// Legend anchored at the left edge of `area`, vertically centred.
pub fn draw_side_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    style: &StyleConfig,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let (w, h) = area.dim_in_pixel();
    let row = (style.label_font_size as i32 * 2).max(18);
    let total = row * entries.len() as i32;
    let x0 = 10;
    let y0 = (h as i32 - total) / 2 + row / 2;
    let x_text = x0 + 48;

    area.draw(&Rectangle::new(
        [(x0 - 6, y0 - row / 2 - 6), (w as i32 - 8, y0 + total - row / 2 + 6)],
        BLACK.mix(0.4).stroke_width(1),
    ))?;

    let text_style = (FONT, style.label_font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (i, entry) in entries.iter().enumerate() {
        let y = y0 + i as i32 * row;
        draw_legend_marker(area, entry, (x0, y), 36)?;
        area.draw(&Text::new(
            entry.label.clone(),
            (x_text, y),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

fn draw_legend_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entry: &LegendEntry,
    (x, y): (i32, i32),
    width: i32,
) -> Result<()> {
    let stroke = entry.color.stroke_width(2);
    match entry.marker {
        LegendMarker::Line(pattern) | LegendMarker::LinePoint(pattern) => {
            draw_swatch(area, [(x, y), (x + width, y)], pattern, stroke)?;
            if matches!(entry.marker, LegendMarker::LinePoint(_)) {
                area.draw(&Circle::new((x + width / 2, y), 4, entry.color.filled()))?;
            }
        }
        LegendMarker::Bar => {
            area.draw(&Rectangle::new(
                [(x + 6, y - 7), (x + width - 6, y + 7)],
                entry.color.filled(),
            ))?;
            area.draw(&Rectangle::new(
                [(x + 6, y - 7), (x + width - 6, y + 7)],
                BLACK.stroke_width(1),
            ))?;
        }
        LegendMarker::Point => {
            area.draw(&Circle::new((x + width / 2, y), 5, entry.color.filled()))?;
        }
    }
    Ok(())
}

/// Short pixel-space line in `pattern`, as used by legend swatches.
fn draw_swatch<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ends: [(i32, i32); 2],
    pattern: LinePattern,
    style: ShapeStyle,
) -> Result<()> {
    match pattern {
        LinePattern::Solid => area.draw(&PathElement::new(ends.to_vec(), style))?,
        LinePattern::Dashed => {
            area.draw(&DashedPathElement::new(ends.to_vec(), DASH, DASH_GAP, style))?
        }
        LinePattern::Dotted => area.draw(&DottedPathElement::new(
            ends.to_vec(),
            0,
            DOT_GAP,
            move |c| Circle::new(c, DOT_RADIUS, style.filled()),
        ))?,
    }
    Ok(())
}

/// Draw a polyline in data coordinates with the given stroke pattern.
pub fn draw_patterned_path<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    points: &[(f64, f64)],
    pattern: LinePattern,
    style: ShapeStyle,
) -> Result<()> {
    let points = points.iter().copied();
    match pattern {
        LinePattern::Solid => {
            chart.draw_series(LineSeries::new(points, style))?;
        }
        LinePattern::Dashed => {
            chart.draw_series(DashedLineSeries::new(points, DASH, DASH_GAP, style))?;
        }
        LinePattern::Dotted => {
            let dot = style.filled();
            chart.draw_series(DottedLineSeries::new(points, 0, DOT_GAP, move |c| {
                Circle::new(c, DOT_RADIUS, dot)
            }))?;
        }
    }
    Ok(())
}

/// Vertical line across the full y range at `x`.
pub fn draw_vertical_marker<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    x: f64,
    y_range: (f64, f64),
    pattern: LinePattern,
    style: ShapeStyle,
) -> Result<()> {
    draw_patterned_path(chart, &[(x, y_range.0), (x, y_range.1)], pattern, style)
}

/// Light vertical guides at each `x`, labelled near the bottom of the plot.
pub fn draw_labeled_guides<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    xs: &[f64],
    y_range: (f64, f64),
    label_font_size: u32,
) -> Result<()> {
    let guide = ShapeStyle::from(&BLACK.mix(0.2)).stroke_width(1);
    let text_y = y_range.0 + 0.03 * (y_range.1 - y_range.0);
    let text_style = (FONT, label_font_size)
        .into_font()
        .color(&BLACK.mix(0.7))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for &x in xs {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, y_range.0), (x, y_range.1)],
            guide,
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            crate::core::format::format_number(x),
            (x, text_y),
            text_style.clone(),
        )))?;
    }
    Ok(())
}

/// Attach an invisible series whose only purpose is a legend entry.
pub fn legend_only<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    label: &str,
    color: RGBColor,
    marker: LegendMarker,
) -> Result<()> {
    let anno = chart.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?;
    let line = color.stroke_width(2);
    match marker {
        LegendMarker::Bar => {
            anno.label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 16, y + 5)], color.filled()));
        }
        LegendMarker::Point => {
            anno.label(label)
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, color.filled()));
        }
        LegendMarker::Line(LinePattern::Dashed) | LegendMarker::LinePoint(LinePattern::Dashed) => {
            anno.label(label).legend(move |(x, y)| {
                DashedPathElement::new(vec![(x, y), (x + 20, y)], 5, 3, line)
            });
        }
        LegendMarker::Line(LinePattern::Dotted) | LegendMarker::LinePoint(LinePattern::Dotted) => {
            anno.label(label).legend(move |(x, y)| {
                DottedPathElement::new(vec![(x, y), (x + 20, y)], 0, 4, move |c| {
                    Circle::new(c, DOT_RADIUS, line.filled())
                })
            });
        }
        LegendMarker::Line(LinePattern::Solid) | LegendMarker::LinePoint(LinePattern::Solid) => {
            anno.label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
        }
    }
    Ok(())
}

/// Draw the labels registered with [`legend_only`] or `.label()` inside the chart.
pub fn draw_inside_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut XyChart<'a, DB>,
    corner: LegendCorner,
    style: &StyleConfig,
) -> Result<()> {
    chart
        .configure_series_labels()
        .position(corner.position())
        .label_font((FONT, style.label_font_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Padded (min, max) for a y axis, falling back to [0, 1] when there is no finite data.
pub fn padded_range(bounds: Option<(f64, f64)>) -> (f64, f64) {
    let (lo, hi) = bounds.unwrap_or((0.0, 1.0));
    let span = (hi - lo).abs();
    let pad = if span > 1e-9 { 0.1 * span } else { 0.1 * hi.abs().max(1.0) };
    (lo - pad, hi + pad)
}

/// White-to-dark-red ramp for heatmap cells, `t` in [0, 1].
pub fn heat_color(t: f64) -> RGBColor {
    const STOPS: [(f64, (u8, u8, u8)); 4] = [
        (0.0, (253, 246, 227)),
        (0.35, (244, 165, 96)),
        (0.7, (203, 64, 59)),
        (1.0, (60, 10, 40)),
    ];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return RGBColor(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2));
        }
    }
    let (_, c) = STOPS[STOPS.len() - 1];
    RGBColor(c.0, c.1, c.2)
}

/// Black text on light cells, white text on dark cells.
pub fn contrast_text(t: f64) -> RGBColor {
    if t > 0.55 { WHITE } else { BLACK }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_cycle_repeats_every_three() {
        assert_eq!(LinePattern::cycle(0), LinePattern::Solid);
        assert_eq!(LinePattern::cycle(1), LinePattern::Dashed);
        assert_eq!(LinePattern::cycle(2), LinePattern::Dotted);
        assert_eq!(LinePattern::cycle(3), LinePattern::Solid);
    }

    fn draw_pattern(pattern: LinePattern) -> Vec<u8> {
        let mut buf = vec![255u8; 200 * 100 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (200, 100)).into_drawing_area();
            let mut chart = ChartBuilder::on(&root)
                .build_cartesian_2d(0.0..1.0, 0.0..1.0)
                .unwrap();
            draw_patterned_path(&mut chart, &[(0.0, 0.5), (1.0, 0.5)], pattern, RED.stroke_width(1))
                .unwrap();
            root.present().unwrap();
        }
        buf
    }

    fn inked(buf: &[u8]) -> usize {
        buf.chunks(3).filter(|px| *px != [255, 255, 255]).count()
    }

    #[test]
    fn dashed_line_leaves_gaps() {
        let solid = inked(&draw_pattern(LinePattern::Solid));
        let dashed = inked(&draw_pattern(LinePattern::Dashed));
        let dotted = inked(&draw_pattern(LinePattern::Dotted));
        assert!(solid > 0);
        assert!(dashed > 0 && dashed < solid, "dashed {dashed} vs solid {solid}");
        assert!(dotted > 0);
    }

    #[test]
    fn legend_swatches_draw_every_pattern() {
        let mut buf = vec![255u8; 120 * 60 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (120, 60)).into_drawing_area();
            for (i, pattern) in [LinePattern::Solid, LinePattern::Dashed, LinePattern::Dotted]
                .into_iter()
                .enumerate()
            {
                let y = 10 + 20 * i as i32;
                draw_swatch(&root, [(10, y), (100, y)], pattern, RED.stroke_width(2)).unwrap();
            }
            root.present().unwrap();
        }
        assert!(inked(&buf) > 0);
    }

    #[test]
    fn heat_ramp_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(253, 246, 227));
        assert_eq!(heat_color(1.0), RGBColor(60, 10, 40));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
    }

    #[test]
    fn padded_range_handles_flat_and_missing_data() {
        assert_eq!(padded_range(None), (-0.1, 1.1));
        let (lo, hi) = padded_range(Some((2.0, 2.0)));
        assert!(lo < 2.0 && hi > 2.0);
    }
}
