//! Chart specifications produced by the dashboard callbacks.
//!
//! A figure is plain data: the egui viewer, the PNG renderer and the JSON
//! export all draw from the same value.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Qualitative palette shared by the on-screen and static charts.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (99, 110, 250),  // Blue
    (239, 85, 59),   // Red
    (0, 204, 150),   // Green
    (171, 99, 250),  // Purple
    (255, 161, 90),  // Orange
    (25, 211, 243),  // Cyan
    (255, 102, 146), // Pink
    (182, 232, 128), // Light Green
    (255, 151, 255), // Magenta
    (254, 203, 82),  // Yellow
];

/// Color for the `index`-th slice or series.
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the whole for each slice, in slice order.
    ///
    /// All zeros when the total is zero, so callers can skip drawing.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| if total > 0.0 { s.value / total } else { 0.0 })
            .collect()
    }

    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    /// Start and end angle of each slice in radians.
    ///
    /// Slices run clockwise from twelve o'clock in screen coordinates
    /// (y pointing down), so the first slice starts at -pi/2.
    pub fn slice_angles(&self) -> Vec<(f64, f64)> {
        let mut start = -FRAC_PI_2;
        self.fractions()
            .into_iter()
            .map(|f| {
                let end = start + f * TAU;
                let angles = (start, end);
                start = end;
                angles
            })
            .collect()
    }

    /// Index of the slice under screen angle `theta`, as returned by `atan2`.
    pub fn slice_at(&self, theta: f64) -> Option<usize> {
        let offset = (theta + FRAC_PI_2).rem_euclid(TAU);
        self.slice_angles().iter().position(|&(start, end)| {
            let (lo, hi) = (start + FRAC_PI_2, end + FRAC_PI_2);
            lo <= offset && offset < hi
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub class: f64,
}

/// Points sharing one booster version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    /// Smallest and largest payload plotted, if any point exists.
    pub fn payload_extent(&self) -> Option<(f64, f64)> {
        self.points().fold(None, |acc, p| match acc {
            None => Some((p.payload_kg, p.payload_kg)),
            Some((lo, hi)) => Some((lo.min(p.payload_kg), hi.max(p.payload_kg))),
        })
    }
}

/// Content of one output slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(pie) => &pie.title,
            Figure::Scatter(scatter) => &scatter.title,
        }
    }
}
