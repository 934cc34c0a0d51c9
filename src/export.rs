//! Headless export: fire every callback once and write the figures to disk.

use crate::callbacks::CallbackRegistry;
use crate::charts::{Figure, RenderError, StaticChartRenderer};
use crate::data::LaunchTable;
use crate::layout::WidgetState;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FIGURES_JSON: &str = "figures.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Serialize)]
#[serde(untagged)]
enum SlotExport {
    Figure(Figure),
    Error { error: String },
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    source: Option<String>,
    rows: usize,
    state: &'a WidgetState,
    figures: BTreeMap<&'static str, SlotExport>,
}

/// Render every output slot for `state` into `dir`.
///
/// Each figure becomes `<slot-id>.png`; `figures.json` records every slot,
/// including the error text of slots whose handler failed. Returns the paths
/// written, JSON last.
pub fn export_figures(
    table: &LaunchTable,
    registry: &CallbackRegistry,
    state: &WidgetState,
    dir: &Path,
    size: (u32, u32),
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    let mut figures = BTreeMap::new();

    for (slot, result) in registry.fire_all(table, state) {
        match result {
            Ok(figure) => {
                let path = dir.join(format!("{}.png", slot));
                StaticChartRenderer::render_figure(&figure, &path, size)?;
                log::info!("Exported {} to {}", slot, path.display());
                written.push(path);
                figures.insert(slot, SlotExport::Figure(figure));
            }
            Err(e) => {
                figures.insert(
                    slot,
                    SlotExport::Error {
                        error: e.to_string(),
                    },
                );
            }
        }
    }

    let document = ExportDocument {
        source: table.source().map(|p| p.display().to_string()),
        rows: table.row_count(),
        state,
        figures,
    };

    let json_path = dir.join(FIGURES_JSON);
    let mut writer = BufWriter::new(File::create(&json_path)?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    log::info!("Wrote {}", json_path.display());
    written.push(json_path);

    Ok(written)
}
