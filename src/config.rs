//! Command line configuration.

use crate::data::PayloadRange;
use crate::layout::{DashboardLayout, WidgetState, ALL_SITES};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CSV: &str = "spacex_launch_dash.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown launch site \"{site}\" (expected one of: {expected})")]
    UnknownSite { site: String, expected: String },
    #[error("Export size must be non-zero, got {0}x{1}")]
    InvalidSize(u32, u32),
}

/// Interactive dashboard over SpaceX launch records.
#[derive(Parser, Debug, Clone)]
#[command(name = "spacex-dash", version, about)]
pub struct Cli {
    /// Launch records CSV file
    #[arg(value_name = "CSV", default_value = DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Initial launch site selection
    #[arg(long, value_name = "SITE", default_value = ALL_SITES)]
    pub site: String,

    /// Initial payload range in kg (defaults to the data's min and max)
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true
    )]
    pub payload: Option<Vec<f64>>,

    /// Write the charts to DIR as PNG and JSON instead of opening a window
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Exported image width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Exported image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Starting widget values: layout defaults overridden by `--site` and
    /// `--payload`.
    pub fn initial_state(&self, layout: &DashboardLayout) -> Result<WidgetState, ConfigError> {
        let mut state = layout.initial_state();

        let dropdown = &layout.site_dropdown;
        if !dropdown.contains(&self.site) {
            let expected = dropdown
                .options
                .iter()
                .map(|o| o.value.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigError::UnknownSite {
                site: self.site.clone(),
                expected,
            });
        }
        state.site = self.site.clone();

        if let Some([low, high]) = self.payload.as_deref() {
            let slider = &layout.payload_slider;
            state.payload = PayloadRange::new(*low, *high).clamp_to(slider.min, slider.max);
        }

        Ok(state)
    }

    pub fn export_size(&self) -> Result<(u32, u32), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidSize(self.width, self.height));
        }
        Ok((self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LaunchTable, BOOSTER_VERSION, CLASS, LAUNCH_SITE, PAYLOAD_MASS};
    use crate::layout::build_layout;
    use polars::prelude::*;

    fn layout() -> DashboardLayout {
        let df = DataFrame::new(vec![
            Column::new(LAUNCH_SITE.into(), &["KSC LC-39A", "VAFB SLC-4E"]),
            Column::new(PAYLOAD_MASS.into(), &[2500.0, 9600.0]),
            Column::new(CLASS.into(), &[1i64, 0]),
            Column::new(BOOSTER_VERSION.into(), &["FT", "B4"]),
        ])
        .unwrap();
        build_layout(&LaunchTable::from_dataframe(df).unwrap())
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["spacex-dash"]).unwrap();
        assert_eq!(cli.csv, PathBuf::from(DEFAULT_CSV));
        assert_eq!(cli.site, "ALL");
        assert!(cli.payload.is_none());
        assert!(cli.export.is_none());
        assert_eq!(cli.export_size().unwrap(), (1000, 600));
        assert_eq!(cli.log_level(), log::LevelFilter::Info);

        let state = cli.initial_state(&layout()).unwrap();
        assert_eq!(state.site, "ALL");
        assert_eq!(state.payload, PayloadRange::new(2500.0, 9600.0));
    }

    #[test]
    fn overrides_site_and_payload() {
        let cli = Cli::try_parse_from([
            "spacex-dash",
            "launches.csv",
            "--site",
            "KSC LC-39A",
            "--payload",
            "12000",
            "-5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.csv, PathBuf::from("launches.csv"));
        assert_eq!(cli.log_level(), log::LevelFilter::Trace);

        let state = cli.initial_state(&layout()).unwrap();
        assert_eq!(state.site, "KSC LC-39A");
        assert_eq!(state.payload, PayloadRange::new(0.0, 10000.0));
    }

    #[test]
    fn rejects_unknown_site() {
        let cli = Cli::try_parse_from(["spacex-dash", "--site", "Boca Chica"]).unwrap();
        match cli.initial_state(&layout()) {
            Err(ConfigError::UnknownSite { site, expected }) => {
                assert_eq!(site, "Boca Chica");
                assert_eq!(expected, "ALL, KSC LC-39A, VAFB SLC-4E");
            }
            other => panic!("expected UnknownSite, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_export_size() {
        let cli = Cli::try_parse_from(["spacex-dash", "--width", "0"]).unwrap();
        assert!(matches!(cli.export_size(), Err(ConfigError::InvalidSize(0, 600))));
    }
}
