//! Dashboard Layout
//! Static widget tree with fixed identifiers, built once from the loaded table.

use crate::data::{LaunchTable, PayloadRange};
use serde::Serialize;

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const SUCCESS_PIE_CHART: &str = "success-pie-chart";
pub const SUCCESS_PAYLOAD_SCATTER_CHART: &str = "success-payload-scatter-chart";

/// Dropdown value selecting every site.
pub const ALL_SITES: &str = "ALL";

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10000.0;
pub const SLIDER_STEP: f64 = 100.0;

const HEADING: &str = "SpaceX Launch Records Dashboard";
const PAYLOAD_LABEL: &str = "Payload range (Kg):";

/// Long names for the launch sites in the SpaceX records.
const SITE_LABELS: [(&str, &str); 4] = [
    ("CCAFS LC-40", "Cape Canaveral AFS Launch Complex 40"),
    ("VAFB SLC-4E", "Vandenberg AFB Space Launch Complex 4E"),
    ("KSC LC-39A", "Kennedy Space Complex Launch Complex 39A"),
    ("CCAFS SLC-40", "Cape Canaveral AFS Space Launch Complex 40"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: &'static str,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

impl Dropdown {
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Display label for `value`, or the value itself when unknown.
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    /// Options whose label or value contains `query`, case-insensitively.
    pub fn matching(&self, query: &str) -> Vec<&DropdownOption> {
        let query = query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| {
                query.is_empty()
                    || o.label.to_lowercase().contains(&query)
                    || o.value.to_lowercase().contains(&query)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSliderSpec {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<(f64, String)>,
    pub value: PayloadRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSlot {
    pub id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub heading: String,
    pub site_dropdown: Dropdown,
    pub pie_slot: OutputSlot,
    pub payload_label: String,
    pub payload_slider: RangeSliderSpec,
    pub scatter_slot: OutputSlot,
}

/// Current values of the input widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetState {
    pub site: String,
    pub payload: PayloadRange,
}

impl DashboardLayout {
    /// Widget values before any user interaction.
    pub fn initial_state(&self) -> WidgetState {
        WidgetState {
            site: self.site_dropdown.value.clone(),
            payload: self.payload_slider.value,
        }
    }
}

fn site_label(site: &str) -> String {
    SITE_LABELS
        .iter()
        .find(|(code, _)| *code == site)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| site.to_string())
}

/// Format a mark label with thousands separators, e.g. `2,500`.
fn mark_label(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Build the dashboard widget tree.
pub fn build_layout(table: &LaunchTable) -> DashboardLayout {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(table.sites().iter().map(|site| DropdownOption {
        label: site_label(site),
        value: site.clone(),
    }));

    let marks = [0.0, 2500.0, 5000.0, 7500.0, 10000.0]
        .into_iter()
        .map(|v| (v, mark_label(v)))
        .collect();

    let (min_payload, max_payload) = table.payload_bounds();

    DashboardLayout {
        heading: HEADING.to_string(),
        site_dropdown: Dropdown {
            id: SITE_DROPDOWN,
            options,
            value: ALL_SITES.to_string(),
            placeholder: "All Sites".to_string(),
            searchable: true,
        },
        pie_slot: OutputSlot {
            id: SUCCESS_PIE_CHART,
        },
        payload_label: PAYLOAD_LABEL.to_string(),
        payload_slider: RangeSliderSpec {
            id: PAYLOAD_SLIDER,
            min: SLIDER_MIN,
            max: SLIDER_MAX,
            step: SLIDER_STEP,
            marks,
            value: PayloadRange::new(min_payload, max_payload).clamp_to(SLIDER_MIN, SLIDER_MAX),
        },
        scatter_slot: OutputSlot {
            id: SUCCESS_PAYLOAD_SCATTER_CHART,
        },
    }
}
