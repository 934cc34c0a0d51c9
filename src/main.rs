//! SpaceX Launch Records Dashboard
//!
//! Opens the dashboard window, or renders the charts to disk with `--export`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use spacex_dash::config::Cli;
use spacex_dash::export::export_figures;
use spacex_dash::gui::DashboardApp;
use spacex_dash::{build_layout, CallbackRegistry, DataLoader};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    spacex_dash::init_logging(cli.log_level());

    let table = DataLoader::load_csv(&cli.csv).with_context(|| {
        format!("Failed to load launch records from {}", cli.csv.display())
    })?;
    let layout = build_layout(&table);
    let state = cli.initial_state(&layout)?;
    let export_size = cli.export_size()?;

    if let Some(dir) = &cli.export {
        let registry = CallbackRegistry::dashboard();
        let written = export_figures(&table, &registry, &state, dir, export_size)?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 950.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(layout.heading.clone()),
        ..Default::default()
    };

    let table = Arc::new(table);

    // Run the application
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(
                DashboardApp::new(cc, table, layout, state).with_export_size(export_size),
            ))
        }),
    )
    .map_err(|e| anyhow!("Failed to start dashboard window: {}", e))
}
