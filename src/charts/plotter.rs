//! Chart Plotter Module
//! Draws dashboard figures inside egui: the pie with the painter, the
//! scatter with egui_plot.

use super::figure::{palette_color, PieChart, ScatterChart};
use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{Legend, Plot, PlotPoints, Points};
use std::f32::consts::TAU;

/// Slices smaller than this get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.04;

/// Draws interactive dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the `index`-th slice or series.
    pub fn color(index: usize) -> Color32 {
        let (r, g, b) = palette_color(index);
        Color32::from_rgb(r, g, b)
    }

    /// Draw a pie chart with percentage labels, a legend and hover details.
    pub fn draw_pie_chart(ui: &mut egui::Ui, pie: &PieChart, height: f32) {
        ui.label(RichText::new(&pie.title).size(18.0).strong());
        ui.add_space(6.0);

        if pie.total() <= 0.0 {
            ui.label(RichText::new("No launches to show").color(Color32::GRAY));
            return;
        }

        let fractions = pie.fractions();
        let angles = pie.slice_angles();

        ui.horizontal(|ui| {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(height, height), Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = rect.width().min(rect.height()) * 0.45;
            let point_at = |angle: f32| center + egui::vec2(angle.cos(), angle.sin()) * radius;

            for (i, &(start, end)) in angles.iter().enumerate() {
                let (start, end) = (start as f32, end as f32);
                let color = Self::color(i);

                // Fan of thin triangles, each one convex
                let steps = (((end - start) / TAU) * 180.0).ceil().max(1.0) as usize;
                for k in 0..steps {
                    let a0 = start + (end - start) * k as f32 / steps as f32;
                    let a1 = start + (end - start) * (k + 1) as f32 / steps as f32;
                    painter.add(egui::Shape::convex_polygon(
                        vec![center, point_at(a0), point_at(a1)],
                        color,
                        Stroke::NONE,
                    ));
                }
            }

            if angles.len() > 1 {
                for &(start, _) in &angles {
                    painter.line_segment(
                        [center, point_at(start as f32)],
                        Stroke::new(1.5, Color32::WHITE),
                    );
                }
            }

            for (i, &(start, end)) in angles.iter().enumerate() {
                if fractions[i] < MIN_LABELLED_FRACTION {
                    continue;
                }
                let mid = ((start + end) / 2.0) as f32;
                let pos = center + egui::vec2(mid.cos(), mid.sin()) * radius * 0.65;
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", fractions[i] * 100.0),
                    FontId::proportional(13.0),
                    Color32::WHITE,
                );
            }

            if let Some(pos) = response.hover_pos() {
                let d = pos - center;
                if d.length() <= radius {
                    let theta = (d.y as f64).atan2(d.x as f64);
                    if let Some(i) = pie.slice_at(theta) {
                        let slice = &pie.slices[i];
                        response.on_hover_text(format!(
                            "{}\n{} ({:.1}%)",
                            slice.label,
                            slice.value,
                            fractions[i] * 100.0
                        ));
                    }
                }
            }

            ui.add_space(20.0);

            // Legend
            ui.vertical(|ui| {
                for (i, slice) in pie.slices.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, Self::color(i));
                        ui.label(RichText::new(&slice.label).size(13.0));
                    });
                }
            });
        });
    }

    /// Draw payload vs outcome scatter, one colored series per booster version.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, chart: &ScatterChart, id: &str, height: f32) {
        ui.label(RichText::new(&chart.title).size(18.0).strong());
        if chart.series.is_empty() {
            ui.label(
                RichText::new("No launches match the current selection").color(Color32::GRAY),
            );
        }
        ui.add_space(6.0);

        let (x_min, x_max) = chart.payload_extent().unwrap_or((0.0, 10000.0));

        Plot::new(format!("scatter_{}", id))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .include_x(x_min)
            .include_x(x_max)
            .include_y(-0.2)
            .include_y(1.2)
            .show(ui, |plot_ui| {
                for (i, series) in chart.series.iter().enumerate() {
                    let points: PlotPoints = series
                        .points
                        .iter()
                        .map(|p| [p.payload_kg, p.class])
                        .collect();

                    plot_ui.points(
                        Points::new(points)
                            .radius(4.0)
                            .color(Self::color(i))
                            .name(&series.name),
                    );
                }
            });
    }
}
