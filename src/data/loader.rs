//! CSV Data Loader Module
//! Loads the launch records CSV into an immutable table using Polars.

use super::{BOOSTER_VERSION, CLASS, LAUNCH_SITE, PAYLOAD_MASS, REQUIRED_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column \"{0}\"")]
    MissingColumn(String),
    #[error("Column \"{column}\" has {count} missing or unparseable values")]
    MissingValues { column: String, count: usize },
    #[error("Column \"{column}\" has {count} values outside {expected}")]
    InvalidValues {
        column: String,
        count: usize,
        expected: &'static str,
    },
    #[error("Dataset has no rows")]
    EmptyDataset,
}

/// The full set of launch records, loaded once and never mutated.
///
/// The four required columns are cast to canonical types on construction:
/// site and booster version to `String`, payload mass to `Float64` and
/// class to `Int32`. Every other column is carried along untouched.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    df: DataFrame,
    payload_min: f64,
    payload_max: f64,
    sites: Vec<String>,
    source: Option<PathBuf>,
}

impl LaunchTable {
    /// Validate and normalise an in-memory frame.
    pub fn from_dataframe(df: DataFrame) -> Result<Self, LoaderError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        if df.height() == 0 {
            return Err(LoaderError::EmptyDataset);
        }

        let df = df
            .lazy()
            .with_columns([
                col(LAUNCH_SITE).cast(DataType::String),
                col(PAYLOAD_MASS).cast(DataType::Float64),
                col(CLASS).cast(DataType::Int32),
                col(BOOSTER_VERSION).cast(DataType::String),
            ])
            .collect()?;

        for name in REQUIRED_COLUMNS {
            let count = df.column(name)?.null_count();
            if count > 0 {
                return Err(LoaderError::MissingValues {
                    column: name.to_string(),
                    count,
                });
            }
        }

        let class = df.column(CLASS)?.i32()?;
        let count = class.into_iter().flatten().filter(|c| !(0..=1).contains(c)).count();
        if count > 0 {
            return Err(LoaderError::InvalidValues {
                column: CLASS.to_string(),
                count,
                expected: "{0, 1}",
            });
        }

        let payload = df.column(PAYLOAD_MASS)?.f64()?;
        let count = payload.into_iter().flatten().filter(|p| !p.is_finite()).count();
        if count > 0 {
            return Err(LoaderError::InvalidValues {
                column: PAYLOAD_MASS.to_string(),
                count,
                expected: "finite numbers",
            });
        }
        let (Some(payload_min), Some(payload_max)) = (payload.min(), payload.max()) else {
            return Err(LoaderError::EmptyDataset);
        };

        // First-appearance order, matching the row order of the file
        let mut sites: Vec<String> = Vec::new();
        for site in df.column(LAUNCH_SITE)?.str()?.into_iter().flatten() {
            if !sites.iter().any(|s| s == site) {
                sites.push(site.to_string());
            }
        }

        Ok(Self {
            df,
            payload_min,
            payload_max,
            sites,
            source: None,
        })
    }

    /// Minimum and maximum payload mass across all records.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Distinct launch sites in first-appearance order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Get the number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// File the table was read from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Reads launch record files with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<LaunchTable, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }
        // Zero-byte files have no header for Polars to read
        if file_path.metadata().is_ok_and(|m| m.len() == 0) {
            return Err(LoaderError::EmptyDataset);
        }

        // Unparseable cells become nulls and are reported per column below
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let mut table = LaunchTable::from_dataframe(df)?;
        table.source = Some(file_path.to_path_buf());

        log::info!(
            "Loaded {} launch records from {} ({} sites, payload {}..{} kg)",
            table.row_count(),
            file_path.display(),
            table.sites.len(),
            table.payload_min,
            table.payload_max
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(sites: &[&str], payloads: &[f64], classes: &[i64], boosters: &[&str]) -> DataFrame {
        DataFrame::new(vec![
            Column::new(LAUNCH_SITE.into(), sites),
            Column::new(PAYLOAD_MASS.into(), payloads),
            Column::new(CLASS.into(), classes),
            Column::new(BOOSTER_VERSION.into(), boosters),
        ])
        .unwrap()
    }

    #[test]
    fn computes_payload_bounds_and_sites() {
        let df = frame(
            &["B", "A", "B", "C"],
            &[500.0, 0.0, 9600.0, 2500.0],
            &[1, 0, 1, 1],
            &["v1.0", "v1.1", "FT", "B4"],
        );
        let table = LaunchTable::from_dataframe(df).unwrap();

        assert_eq!(table.payload_bounds(), (0.0, 9600.0));
        assert_eq!(table.sites(), ["B", "A", "C"]);
        assert_eq!(table.row_count(), 4);
        assert!(table.has_site("C"));
        assert!(!table.has_site("ALL"));
        assert!(table.source().is_none());
    }

    #[test]
    fn integer_payloads_are_cast_to_float() {
        let df = DataFrame::new(vec![
            Column::new(LAUNCH_SITE.into(), &["A", "A"]),
            Column::new(PAYLOAD_MASS.into(), &[100i64, 300]),
            Column::new(CLASS.into(), &[1i64, 0]),
            Column::new(BOOSTER_VERSION.into(), &["FT", "FT"]),
        ])
        .unwrap();
        let table = LaunchTable::from_dataframe(df).unwrap();

        assert_eq!(table.payload_bounds(), (100.0, 300.0));
        assert_eq!(
            table.dataframe().column(CLASS).unwrap().dtype(),
            &DataType::Int32
        );
    }

    #[test]
    fn rejects_missing_column() {
        let df = DataFrame::new(vec![
            Column::new(LAUNCH_SITE.into(), &["A"]),
            Column::new(PAYLOAD_MASS.into(), &[1.0]),
            Column::new(CLASS.into(), &[1i64]),
        ])
        .unwrap();

        match LaunchTable::from_dataframe(df) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, BOOSTER_VERSION),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_frame() {
        let df = frame(&[], &[], &[], &[]);
        assert!(matches!(
            LaunchTable::from_dataframe(df),
            Err(LoaderError::EmptyDataset)
        ));
    }

    #[test]
    fn rejects_null_payload() {
        let df = DataFrame::new(vec![
            Column::new(LAUNCH_SITE.into(), &["A", "A"]),
            Column::new(PAYLOAD_MASS.into(), &[Some(1.0), None]),
            Column::new(CLASS.into(), &[1i64, 0]),
            Column::new(BOOSTER_VERSION.into(), &["FT", "FT"]),
        ])
        .unwrap();

        match LaunchTable::from_dataframe(df) {
            Err(LoaderError::MissingValues { column, count }) => {
                assert_eq!(column, PAYLOAD_MASS);
                assert_eq!(count, 1);
            }
            other => panic!("expected MissingValues, got {:?}", other),
        }
    }

    #[test]
    fn rejects_class_outside_outcomes() {
        let df = frame(&["A", "A", "A"], &[100.0, 200.0, 300.0], &[1, 0, 2], &["FT", "FT", "FT"]);

        match LaunchTable::from_dataframe(df) {
            Err(LoaderError::InvalidValues { column, count, .. }) => {
                assert_eq!(column, CLASS);
                assert_eq!(count, 1);
            }
            other => panic!("expected InvalidValues, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_payload() {
        let df = frame(&["A", "A"], &[f64::NAN, 200.0], &[1, 0], &["FT", "FT"]);

        match LaunchTable::from_dataframe(df) {
            Err(LoaderError::InvalidValues { column, count, .. }) => {
                assert_eq!(column, PAYLOAD_MASS);
                assert_eq!(count, 1);
            }
            other => panic!("expected InvalidValues, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = DataLoader::load_csv("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }
}
