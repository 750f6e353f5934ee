//! Static Chart Renderer
//! Draws [`LineChart`] descriptions to SVG with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Date x-axis, value y-axis with light mesh
//! 3. Data series as thick lines, reference lines as thin lines across the full width
//! 4. Legend in the upper-right corner

use crate::charts::plotter::LineChart;
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(52, 152, 219), // Blue
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
];

const REFERENCE_COLORS: [RGBColor; 2] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(243, 156, 18), // Orange
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw in chart '{0}'")]
    Empty(String),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Renders line charts to SVG documents of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 600,
        }
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render `chart` and return the SVG document.
    pub fn render_to_string(&self, chart: &LineChart) -> Result<String, RenderError> {
        let (x_lo, x_hi) = chart
            .date_range()
            .ok_or_else(|| RenderError::Empty(chart.title.clone()))?;
        let (y_lo, y_hi) = chart
            .value_range()
            .ok_or_else(|| RenderError::Empty(chart.title.clone()))?;
        let (x_lo, x_hi) = Self::pad_dates(x_lo, x_hi);
        let (y_lo, y_hi) = Self::pad_values(y_lo, y_hi);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;

            let mut ctx = ChartBuilder::on(&root)
                .caption(&chart.title, ("sans-serif", 22))
                .margin(12)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(drawing)?;

            let date_fmt = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();
            ctx.configure_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .x_labels(8)
                .x_label_formatter(&date_fmt)
                .light_line_style(RGBColor(235, 235, 235))
                .draw()
                .map_err(drawing)?;

            for (i, series) in chart.series.iter().enumerate() {
                let color = SERIES_COLORS[i % SERIES_COLORS.len()];
                ctx.draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(drawing)?
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            for (i, line) in chart
                .reference_lines
                .iter()
                .filter(|l| l.y.is_finite())
                .enumerate()
            {
                let color = REFERENCE_COLORS[i % REFERENCE_COLORS.len()];
                ctx.draw_series(LineSeries::new(
                    [(x_lo, line.y), (x_hi, line.y)],
                    color.stroke_width(1),
                ))
                .map_err(drawing)?
                .label(format!("{} = {:.2}", line.label, line.y))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing)?;

            root.present().map_err(drawing)?;
        }

        Ok(svg)
    }

    /// Render `chart` into an `.svg` file at `path`.
    pub fn render_to_file(&self, chart: &LineChart, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let svg = self.render_to_string(chart)?;
        std::fs::write(path, svg)?;
        log::info!("wrote chart '{}' to {}", chart.title, path.display());
        Ok(())
    }

    /// A one-day range cannot be drawn; widen it by a day on each side.
    fn pad_dates(lo: NaiveDate, hi: NaiveDate) -> (NaiveDate, NaiveDate) {
        if lo < hi {
            return (lo, hi);
        }
        (
            lo.checked_sub_days(Days::new(1)).unwrap_or(lo),
            hi.checked_add_days(Days::new(1)).unwrap_or(hi),
        )
    }

    fn pad_values(lo: f64, hi: f64) -> (f64, f64) {
        let pad = if hi > lo { (hi - lo) * 0.1 } else { lo.abs().max(1.0) * 0.1 };
        (lo - pad, hi + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::plotter::{ChartPlotter, ChartSeries, ReferenceLine};
    use crate::data::{DataProcessor, RawTable};

    fn chart() -> LineChart {
        let ds = DataProcessor::derive(RawTable::from_rows(vec![
            (NaiveDate::from_ymd_opt(2021, 11, 10), Some(10.0)),
            (NaiveDate::from_ymd_opt(2021, 11, 20), Some(30.0)),
            (NaiveDate::from_ymd_opt(2021, 11, 28), Some(20.0)),
        ]));
        ChartPlotter::month_chart(&ds, 11)
    }

    #[test]
    fn renders_svg_document() {
        let svg = SvgRenderer::new(640, 400).render_to_string(&chart()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("November"));
        assert!(svg.contains("Median"));
    }

    #[test]
    fn single_point_chart_is_padded() {
        let single = LineChart {
            title: "one".to_string(),
            x_label: "Date".to_string(),
            y_label: "Value".to_string(),
            series: vec![ChartSeries {
                name: "Value".to_string(),
                points: vec![(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), 5.0)],
            }],
            reference_lines: vec![ReferenceLine {
                label: "Mean".to_string(),
                y: 5.0,
            }],
        };
        assert!(SvgRenderer::default().render_to_string(&single).is_ok());
    }

    #[test]
    fn empty_chart_is_an_error() {
        let empty = ChartPlotter::full_period_chart(&Default::default());
        assert!(matches!(
            SvgRenderer::default().render_to_string(&empty),
            Err(RenderError::Empty(_))
        ));
    }

    #[test]
    fn writes_file() {
        let path = std::env::temp_dir().join("tsdeviation_renderer_writes_file.svg");
        SvgRenderer::default().render_to_file(&chart(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }
}
