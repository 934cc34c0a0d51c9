//! Charts module - Figure specs and rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{
    palette_color, Figure, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries, PALETTE,
};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
