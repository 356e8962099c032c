//! Rate chart rendering.
//!
//! Draws smoothed rate curves as line series on a PNG bitmap. The x-axis is
//! the window index (seconds for the default one-second window), the y-axis
//! the smoothed rate.

use std::{ops::Range, path::Path};

use anyhow::Result;
use plotters::prelude::*;
use tracing::debug;

use crate::rate::RateSeries;

pub const CHART_SIZE: (u32, u32) = (640, 480);

const PALETTE: [RGBColor; 6] = [
    BLUE,
    RED,
    GREEN,
    RGBColor(128, 0, 128),
    BLACK,
    RGBColor(128, 128, 128),
];

/// Line color of the `index`-th series.
pub fn line_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Labels and axis bounds of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Fixed y-axis upper bound. Fitted to the data when `None`.
    pub y_max: Option<f64>,
}

impl ChartLayout {
    /// Layout of a sweep chart: per-node rates, one curve per group.
    pub fn sweep() -> Self {
        Self {
            title: "Performance Graph of Peerchat".to_string(),
            x_desc: "Time (seconds)".to_string(),
            y_desc: "RPCs per second per node".to_string(),
            y_max: None,
        }
    }

    /// Layout of a single run chart.
    pub fn run(y_max: f64) -> Self {
        Self {
            title: "Performance Graph of Peerchat".to_string(),
            x_desc: "Time (seconds)".to_string(),
            y_desc: "RPCs per second".to_string(),
            y_max: Some(y_max),
        }
    }

    pub fn x_range(&self, series: &[RateSeries]) -> Range<f64> {
        let longest = series.iter().map(|s| s.smoothed.len()).max().unwrap_or(0);

        0.0..(longest.saturating_sub(1).max(1) as f64)
    }

    pub fn y_range(&self, series: &[RateSeries]) -> Range<f64> {
        if let Some(y_max) = self.y_max {
            return 0.0..y_max;
        }

        let top = series
            .iter()
            .filter_map(RateSeries::max_smoothed)
            .fold(0.0, f64::max);

        0.0..(top * 1.1).max(1.0)
    }
}

/// Renders `series` as a line chart into the PNG file at `path`.
///
/// Labelled series get a legend entry in the lower right corner.
pub fn render(path: &Path, layout: &ChartLayout, series: &[RateSeries]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&layout.title, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(layout.x_range(series), layout.y_range(series))?;

    chart
        .configure_mesh()
        .x_desc(layout.x_desc.as_str())
        .y_desc(layout.y_desc.as_str())
        .draw()?;

    let mut has_legend = false;

    for (j, s) in series.iter().enumerate() {
        let color = line_color(j);
        let points = s
            .smoothed
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y));

        let drawn = chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;

        if let Some(label) = s.label() {
            drawn
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            has_legend = true;
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;

    debug!(path = %path.display(), series = series.len(), "Chart rendered");

    Ok(())
}
