//! Data Processor Module
//! Derived views over the launch table: site and payload filters, per-group
//! outcome counts and typed record extraction.

use super::{BOOSTER_VERSION, CLASS, LAUNCH_SITE, PAYLOAD_MASS};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

const SUCCESS_COUNT: &str = "successes";
const ROW_COUNT: &str = "count";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Unexpected null in column \"{0}\"")]
    UnexpectedNull(&'static str),
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }

    /// Clamp both bounds into `[min, max]`.
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        Self::new(self.low.clamp(min, max), self.high.clamp(min, max))
    }
}

/// One launch, extracted from a derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub class: i32,
    pub booster_version: String,
}

impl LaunchRecord {
    pub fn is_success(&self) -> bool {
        self.class == 1
    }
}

/// Filtering and aggregation over a launch DataFrame.
///
/// Every operation takes the frame by reference and returns a new one, so
/// the loaded table is never touched.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep only the rows launched from `site`.
    pub fn filter_site(df: &DataFrame, site: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(LAUNCH_SITE).eq(lit(site)))
            .collect()?;
        Ok(filtered)
    }

    /// Keep only the rows whose payload lies within `range`, bounds included.
    pub fn filter_payload(df: &DataFrame, range: PayloadRange) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(PAYLOAD_MASS)
                    .gt_eq(lit(range.low))
                    .and(col(PAYLOAD_MASS).lt_eq(lit(range.high))),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Number of successful launches per site, sorted by site.
    ///
    /// Sites with no success still appear, with a count of zero.
    pub fn success_counts_by_site(df: &DataFrame) -> Result<Vec<(String, u32)>, ProcessorError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(LAUNCH_SITE)])
            .agg([col(CLASS).eq(lit(1)).sum().alias(SUCCESS_COUNT)])
            .collect()?;

        let sites = grouped.column(LAUNCH_SITE)?.str()?;
        let counts = grouped.column(SUCCESS_COUNT)?.cast(&DataType::UInt32)?;
        let counts = counts.u32()?;

        let mut result = Vec::with_capacity(grouped.height());
        for (site, count) in sites.into_iter().zip(counts.into_iter()) {
            let site = site.ok_or(ProcessorError::UnexpectedNull(LAUNCH_SITE))?;
            result.push((site.to_string(), count.unwrap_or(0)));
        }
        result.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(result)
    }

    /// Number of rows per outcome class, success first.
    pub fn outcome_counts(df: &DataFrame) -> Result<Vec<(i32, u32)>, ProcessorError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(CLASS)])
            .agg([len().alias(ROW_COUNT)])
            .collect()?;

        let classes = grouped.column(CLASS)?.i32()?;
        let counts = grouped.column(ROW_COUNT)?.cast(&DataType::UInt32)?;
        let counts = counts.u32()?;

        let mut result = Vec::with_capacity(grouped.height());
        for (class, count) in classes.into_iter().zip(counts.into_iter()) {
            let class = class.ok_or(ProcessorError::UnexpectedNull(CLASS))?;
            result.push((class, count.unwrap_or(0)));
        }
        result.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(result)
    }

    /// Extract typed records in row order.
    pub fn records(df: &DataFrame) -> Result<Vec<LaunchRecord>, ProcessorError> {
        let sites = df.column(LAUNCH_SITE)?.str()?;
        let payloads = df.column(PAYLOAD_MASS)?.f64()?;
        let classes = df.column(CLASS)?.i32()?;
        let boosters = df.column(BOOSTER_VERSION)?.str()?;

        let mut records = Vec::with_capacity(df.height());
        for (((site, payload), class), booster) in sites
            .into_iter()
            .zip(payloads.into_iter())
            .zip(classes.into_iter())
            .zip(boosters.into_iter())
        {
            records.push(LaunchRecord {
                site: site.ok_or(ProcessorError::UnexpectedNull(LAUNCH_SITE))?.to_string(),
                payload_kg: payload.ok_or(ProcessorError::UnexpectedNull(PAYLOAD_MASS))?,
                class: class.ok_or(ProcessorError::UnexpectedNull(CLASS))?,
                booster_version: booster
                    .ok_or(ProcessorError::UnexpectedNull(BOOSTER_VERSION))?
                    .to_string(),
            });
        }
        Ok(records)
    }
}
