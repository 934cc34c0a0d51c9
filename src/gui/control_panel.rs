//! Control Panel Widget
//! Draws the input widgets declared by the layout and reports which changed.

use super::range_slider::RangeSlider;
use crate::data::PayloadRange;
use crate::layout::{Dropdown, RangeSliderSpec, WidgetState, PAYLOAD_SLIDER, SITE_DROPDOWN};
use egui::{Color32, ComboBox, RichText};

/// Input widgets of the dashboard page.
#[derive(Default)]
pub struct ControlPanel {
    /// Filter text typed into the site dropdown
    pub search: String,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the searchable site dropdown.
    pub fn show_site_dropdown(
        &mut self,
        ui: &mut egui::Ui,
        dropdown: &Dropdown,
        state: &mut WidgetState,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let selected = if state.site.is_empty() {
            dropdown.placeholder.clone()
        } else {
            dropdown.label_for(&state.site).to_string()
        };

        ComboBox::from_id_salt(dropdown.id)
            .width(ui.available_width().min(520.0))
            .selected_text(selected)
            .show_ui(ui, |ui| {
                if dropdown.searchable {
                    ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("Search sites"));
                    ui.separator();
                }

                let options = dropdown.matching(&self.search);
                if options.is_empty() {
                    ui.label(RichText::new("No matching sites").color(Color32::GRAY));
                }
                for option in options {
                    let is_selected = state.site == option.value;
                    if ui.selectable_label(is_selected, option.label.as_str()).clicked()
                        && !is_selected
                    {
                        state.site = option.value.clone();
                        action = ControlPanelAction::SiteChanged;
                    }
                }
            });

        if action != ControlPanelAction::None {
            self.search.clear();
        }
        action
    }

    /// Draw the labelled payload range slider.
    pub fn show_payload_slider(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        slider: &RangeSliderSpec,
        state: &mut WidgetState,
    ) -> ControlPanelAction {
        ui.label(RichText::new(label).size(14.0));
        ui.add_space(4.0);

        let mut value = [state.payload.low, state.payload.high];
        let response = ui.add(
            RangeSlider::new(&mut value, slider.min..=slider.max)
                .step(slider.step)
                .marks(&slider.marks),
        );

        ui.label(
            RichText::new(format!("{:.0} kg to {:.0} kg", value[0], value[1]))
                .size(12.0)
                .color(Color32::GRAY),
        );

        if response.changed() {
            state.payload = PayloadRange::new(value[0], value[1]);
            ControlPanelAction::PayloadChanged
        } else {
            ControlPanelAction::None
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    SiteChanged,
    PayloadChanged,
}

impl ControlPanelAction {
    /// Identifier of the widget whose value changed, if any.
    pub fn changed_widget(self) -> Option<&'static str> {
        match self {
            ControlPanelAction::None => None,
            ControlPanelAction::SiteChanged => Some(SITE_DROPDOWN),
            ControlPanelAction::PayloadChanged => Some(PAYLOAD_SLIDER),
        }
    }
}
