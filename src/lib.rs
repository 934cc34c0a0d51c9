//! SpaceX Launch Records Dashboard
//!
//! Loads a CSV of launch records once and serves an interactive window with
//! a site dropdown, a payload range slider, an outcome pie chart and a
//! payload vs. outcome scatter chart.

pub mod callbacks;
pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod layout;

pub use callbacks::{CallbackError, CallbackRegistry};
pub use data::{DataLoader, LaunchTable, LoaderError};
pub use layout::{build_layout, DashboardLayout, WidgetState};

/// Initialize logging. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("spacex_dash", level)
        .parse_default_env()
        .init();
}
