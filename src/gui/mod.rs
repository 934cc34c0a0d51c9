//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod range_slider;

pub use app::DashboardApp;
pub use chart_viewer::{ChartViewer, ChartViewerAction, SlotContent};
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use range_slider::RangeSlider;
