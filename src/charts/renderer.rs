//! Static Chart Renderer
//! Renders dashboard figures to PNG files with plotters.
//!
//! Layout:
//! - Pie: title on top, pie on the left two thirds, legend on the right
//! - Scatter: captioned cartesian chart with one point series per booster
//!   version and a series legend in the upper right corner

use super::figure::{palette_color, Figure, PieChart, ScatterChart};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 26.0;
const LABEL_SIZE: f64 = 16.0;

/// Slices smaller than this get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.04;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(index: usize) -> RGBColor {
    let (r, g, b) = palette_color(index);
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render any figure to a PNG at `path`.
    pub fn render_figure(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        match figure {
            Figure::Pie(pie) => Self::render_pie_png(pie, path, size),
            Figure::Scatter(scatter) => Self::render_scatter_png(scatter, path, size),
        }
    }

    pub fn render_pie_png(pie: &PieChart, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root
            .titled(&pie.title, (FONT, TITLE_SIZE))
            .map_err(draw_err)?;

        let (width, height) = root.dim_in_pixel();
        let legend_width = width as i32 / 3;
        let center = ((width as i32 - legend_width) / 2, height as i32 / 2);
        let radius = ((width as i32 - legend_width).min(height as i32) as f64) * 0.42;

        let fractions = pie.fractions();
        for (i, &(start, end)) in pie.slice_angles().iter().enumerate() {
            if fractions[i] <= 0.0 {
                continue;
            }
            root.draw(&Polygon::new(
                Self::sector_points(center, radius, start, end),
                rgb(i).filled(),
            ))
            .map_err(draw_err)?;

            if fractions[i] >= MIN_LABELLED_FRACTION {
                let mid = (start + end) / 2.0;
                let pos = (
                    center.0 + (mid.cos() * radius * 0.65) as i32,
                    center.1 + (mid.sin() * radius * 0.65) as i32,
                );
                let style = (FONT, LABEL_SIZE)
                    .into_font()
                    .color(&WHITE)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                root.draw(&Text::new(
                    format!("{:.1}%", fractions[i] * 100.0),
                    pos,
                    style,
                ))
                .map_err(draw_err)?;
            }
        }

        let legend_x = width as i32 - legend_width + 20;
        let mut legend_y = (height as i32 - pie.slices.len() as i32 * 26) / 2;
        for (i, slice) in pie.slices.iter().enumerate() {
            root.draw(&Rectangle::new(
                [(legend_x, legend_y), (legend_x + 16, legend_y + 16)],
                rgb(i).filled(),
            ))
            .map_err(draw_err)?;
            root.draw(&Text::new(
                format!("{} ({})", slice.label, slice.value),
                (legend_x + 24, legend_y),
                (FONT, LABEL_SIZE).into_font(),
            ))
            .map_err(draw_err)?;
            legend_y += 26;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    pub fn render_scatter_png(
        chart: &ScatterChart,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_min, x_max) = Self::payload_axis(chart);
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, TITLE_SIZE))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, -0.2f64..1.2f64)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = rgb(i);
            ctx.draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Circle::new((p.payload_kg, p.class), 5, color.filled())),
            )
            .map_err(draw_err)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        if !chart.series.is_empty() {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Payload axis bounds padded around the data, or the full slider
    /// range when nothing is plotted.
    fn payload_axis(chart: &ScatterChart) -> (f64, f64) {
        match chart.payload_extent() {
            Some((lo, hi)) => {
                let pad = ((hi - lo) * 0.05).max(100.0);
                (lo - pad, hi + pad)
            }
            None => (0.0, 10000.0),
        }
    }

    /// Outline of one pie sector: the center followed by points along the arc.
    fn sector_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
        let steps = ((end - start).to_degrees().abs().ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for k in 0..=steps {
            let angle = start + (end - start) * k as f64 / steps as f64;
            points.push((
                center.0 + (angle.cos() * radius).round() as i32,
                center.1 + (angle.sin() * radius).round() as i32,
            ));
        }
        points
    }
}
