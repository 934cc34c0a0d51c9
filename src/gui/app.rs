//! Dashboard Main Application
//! Single page: heading, site dropdown, outcome pie, payload slider and
//! payload scatter, re-rendered through the callback registry.

use crate::callbacks::CallbackRegistry;
use crate::charts::StaticChartRenderer;
use crate::data::LaunchTable;
use crate::gui::{ChartViewer, ChartViewerAction, ControlPanel, ControlPanelAction};
use crate::layout::{DashboardLayout, WidgetState};
use egui::{Color32, RichText};
use std::sync::Arc;

const HEADING_COLOR: Color32 = Color32::from_rgb(80, 61, 54);
const DEFAULT_EXPORT_SIZE: (u32, u32) = (1000, 600);

/// Main application window.
pub struct DashboardApp {
    table: Arc<LaunchTable>,
    layout: DashboardLayout,
    state: WidgetState,
    registry: CallbackRegistry,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    export_size: (u32, u32),
    status: String,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: Arc<LaunchTable>,
        layout: DashboardLayout,
        state: WidgetState,
    ) -> Self {
        let registry = CallbackRegistry::dashboard();
        let mut chart_viewer = ChartViewer::new();
        chart_viewer.apply(registry.fire_all(&table, &state));

        let source = table
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "memory".to_string());
        let status = format!("Loaded {} launch records from {}", table.row_count(), source);

        Self {
            table,
            layout,
            state,
            registry,
            control_panel: ControlPanel::new(),
            chart_viewer,
            export_size: DEFAULT_EXPORT_SIZE,
            status,
        }
    }

    pub fn with_export_size(mut self, size: (u32, u32)) -> Self {
        self.export_size = size;
        self
    }

    /// Re-fire the callbacks bound to the changed widgets.
    fn handle_widget_changes(&mut self, actions: &[ControlPanelAction]) {
        let changed: Vec<&'static str> = actions
            .iter()
            .filter_map(|a| a.changed_widget())
            .collect();
        if changed.is_empty() {
            return;
        }

        let fired = self
            .registry
            .fire_changed(&self.table, &self.state, &changed);
        self.chart_viewer.apply(fired);
    }

    /// Save one chart as PNG through a file dialog
    fn handle_export_png(&mut self, slot: &'static str) {
        let Some(figure) = self.chart_viewer.figure(slot) else {
            self.status = format!("Error: nothing to export for {}", slot);
            return;
        };

        // Ask user for output location
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", slot))
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_figure(figure, &path, self.export_size) {
            Ok(()) => {
                log::info!("Exported {} to {}", slot, path.display());
                self.status = format!("Exported {} to {}", figure.title(), path.display());
            }
            Err(e) => {
                log::warn!("Export of {} failed: {}", slot, e);
                self.status = format!("Error: {}", e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        });

        let mut panel_actions = Vec::new();
        let mut viewer_actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(10.0);
                        ui.label(
                            RichText::new(&self.layout.heading)
                                .size(40.0)
                                .color(HEADING_COLOR),
                        );
                    });
                    ui.add_space(15.0);

                    panel_actions.push(self.control_panel.show_site_dropdown(
                        ui,
                        &self.layout.site_dropdown,
                        &mut self.state,
                    ));
                    ui.add_space(15.0);

                    viewer_actions.push(self.chart_viewer.show_slot(ui, self.layout.pie_slot.id));
                    ui.add_space(15.0);

                    panel_actions.push(self.control_panel.show_payload_slider(
                        ui,
                        &self.layout.payload_label,
                        &self.layout.payload_slider,
                        &mut self.state,
                    ));
                    ui.add_space(15.0);

                    viewer_actions
                        .push(self.chart_viewer.show_slot(ui, self.layout.scatter_slot.id));
                    ui.add_space(10.0);
                });
        });

        self.handle_widget_changes(&panel_actions);

        for action in viewer_actions {
            match action {
                ChartViewerAction::ExportPng(slot) => self.handle_export_png(slot),
                ChartViewerAction::None => {}
            }
        }
    }
}
