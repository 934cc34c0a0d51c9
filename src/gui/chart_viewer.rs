//! Chart Viewer Widget
//! Output slots of the dashboard: each holds the last figure (or error) its
//! callback produced and draws it inside a card.

use crate::callbacks::Fired;
use crate::charts::{ChartPlotter, Figure};
use egui::{Color32, RichText};
use std::collections::HashMap;

const PIE_HEIGHT: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 360.0;

/// What an output slot currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    Figure(Figure),
    Error(String),
}

/// Actions triggered from a chart card
#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewerAction {
    None,
    ExportPng(&'static str),
}

#[derive(Default)]
pub struct ChartViewer {
    slots: HashMap<&'static str, SlotContent>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content of every slot that just fired.
    pub fn apply(&mut self, fired: Vec<Fired>) {
        for (slot, result) in fired {
            let content = match result {
                Ok(figure) => SlotContent::Figure(figure),
                Err(e) => SlotContent::Error(e.to_string()),
            };
            self.slots.insert(slot, content);
        }
    }

    pub fn content(&self, slot: &str) -> Option<&SlotContent> {
        self.slots.get(slot)
    }

    pub fn figure(&self, slot: &str) -> Option<&Figure> {
        match self.slots.get(slot) {
            Some(SlotContent::Figure(figure)) => Some(figure),
            _ => None,
        }
    }

    /// Draw one output slot as a card.
    pub fn show_slot(&self, ui: &mut egui::Ui, slot: &'static str) -> ChartViewerAction {
        let mut action = ChartViewerAction::None;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                match self.slots.get(slot) {
                    None => {
                        ui.label(RichText::new("No Data").size(16.0).color(Color32::GRAY));
                    }
                    Some(SlotContent::Error(message)) => {
                        ui.label(
                            RichText::new(format!("⚠ {}", message))
                                .size(14.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    }
                    Some(SlotContent::Figure(figure)) => {
                        match figure {
                            Figure::Pie(pie) => ChartPlotter::draw_pie_chart(ui, pie, PIE_HEIGHT),
                            Figure::Scatter(scatter) => {
                                ChartPlotter::draw_scatter_chart(ui, scatter, slot, SCATTER_HEIGHT)
                            }
                        }

                        ui.add_space(6.0);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("📷 Export PNG").clicked() {
                                action = ChartViewerAction::ExportPng(slot);
                            }
                        });
                    }
                }
            });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::CallbackError;
    use crate::charts::{PieChart, PieSlice};

    #[test]
    fn apply_replaces_fired_slots_only() {
        let mut viewer = ChartViewer::new();
        let pie = Figure::Pie(PieChart {
            title: "Total Success Launches By Site".into(),
            slices: vec![PieSlice {
                label: "A".into(),
                value: 3.0,
            }],
        });

        viewer.apply(vec![
            ("success-pie-chart", Ok(pie.clone())),
            (
                "success-payload-scatter-chart",
                Err(CallbackError::UnmappedSelection("Z".into())),
            ),
        ]);
        assert_eq!(viewer.figure("success-pie-chart"), Some(&pie));
        assert!(matches!(
            viewer.content("success-payload-scatter-chart"),
            Some(SlotContent::Error(msg)) if msg.contains("\"Z\"")
        ));

        viewer.apply(vec![(
            "success-pie-chart",
            Err(CallbackError::UnmappedSelection("Y".into())),
        )]);
        assert!(viewer.figure("success-pie-chart").is_none());
        assert!(viewer.content("success-payload-scatter-chart").is_some());
        assert!(viewer.content("other").is_none());
    }
}
