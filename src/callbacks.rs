//! Dashboard Callbacks
//! Pure handlers that turn the current widget values into figures, and the
//! registry that binds each handler to its input widgets and output slot.

use crate::charts::{Figure, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries};
use crate::data::{DataProcessor, LaunchTable, PayloadRange, ProcessorError, PAYLOAD_MASS};
use crate::layout::{
    WidgetState, ALL_SITES, PAYLOAD_SLIDER, SITE_DROPDOWN, SUCCESS_PAYLOAD_SCATTER_CHART,
    SUCCESS_PIE_CHART,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("Unknown launch site selection \"{0}\"")]
    UnmappedSelection(String),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Resolved dropdown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSelection<'a> {
    All,
    Site(&'a str),
}

impl<'a> SiteSelection<'a> {
    /// Map a raw dropdown value onto the table's sites.
    pub fn resolve(value: &'a str, table: &LaunchTable) -> Result<Self, CallbackError> {
        if value == ALL_SITES {
            Ok(SiteSelection::All)
        } else if table.has_site(value) {
            Ok(SiteSelection::Site(value))
        } else {
            Err(CallbackError::UnmappedSelection(value.to_string()))
        }
    }
}

/// Pie of successful launches.
///
/// For every site at once, one slice per site sized by its success count.
/// For a single site, a success slice and a failure slice sized by row count;
/// a class that never occurs at the site gets no slice.
pub fn success_pie_chart(table: &LaunchTable, site: &str) -> Result<PieChart, CallbackError> {
    match SiteSelection::resolve(site, table)? {
        SiteSelection::All => {
            let counts = DataProcessor::success_counts_by_site(table.dataframe())?;
            Ok(PieChart {
                title: "Total Success Launches By Site".to_string(),
                slices: counts
                    .into_iter()
                    .map(|(site, count)| PieSlice {
                        label: site,
                        value: count as f64,
                    })
                    .collect(),
            })
        }
        SiteSelection::Site(site) => {
            let view = DataProcessor::filter_site(table.dataframe(), site)?;
            let counts = DataProcessor::outcome_counts(&view)?;
            Ok(PieChart {
                title: format!("Total Success Launches for {}", site),
                slices: counts
                    .into_iter()
                    .map(|(class, count)| PieSlice {
                        label: outcome_label(class).to_string(),
                        value: count as f64,
                    })
                    .collect(),
            })
        }
    }
}

/// Scatter of payload mass against outcome class, one series per booster.
///
/// The payload range only applies to a single-site selection; with every
/// site selected all launches are plotted.
pub fn success_payload_scatter_chart(
    table: &LaunchTable,
    site: &str,
    payload: PayloadRange,
) -> Result<ScatterChart, CallbackError> {
    let (view, title) = match SiteSelection::resolve(site, table)? {
        SiteSelection::All => (
            table.dataframe().clone(),
            "Correlation Between Payload and Success For All Sites".to_string(),
        ),
        SiteSelection::Site(site) => {
            let view = DataProcessor::filter_site(table.dataframe(), site)?;
            (
                DataProcessor::filter_payload(&view, payload)?,
                format!("Correlation Between Payload and Success For {} Site", site),
            )
        }
    };

    let mut series: Vec<ScatterSeries> = Vec::new();
    for record in DataProcessor::records(&view)? {
        let point = ScatterPoint {
            payload_kg: record.payload_kg,
            class: record.class as f64,
        };
        match series.iter_mut().find(|s| s.name == record.booster_version) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: record.booster_version,
                points: vec![point],
            }),
        }
    }

    Ok(ScatterChart {
        title,
        x_label: PAYLOAD_MASS.to_string(),
        y_label: "class".to_string(),
        series,
    })
}

fn outcome_label(class: i32) -> &'static str {
    if class == 1 {
        "Success"
    } else {
        "Failure"
    }
}

pub type Handler = fn(&LaunchTable, &WidgetState) -> Result<Figure, CallbackError>;

/// A handler bound to its input widgets and output slot.
pub struct Callback {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
    handler: Handler,
}

impl Callback {
    pub fn new(output: &'static str, inputs: &'static [&'static str], handler: Handler) -> Self {
        Self {
            output,
            inputs,
            handler,
        }
    }

    pub fn depends_on(&self, widget_id: &str) -> bool {
        self.inputs.iter().any(|id| *id == widget_id)
    }

    pub fn fire(&self, table: &LaunchTable, state: &WidgetState) -> Result<Figure, CallbackError> {
        log::debug!(
            "Firing {} (site={}, payload={}..{})",
            self.output,
            state.site,
            state.payload.low,
            state.payload.high
        );
        let result = (self.handler)(table, state);
        if let Err(e) = &result {
            log::warn!("{} failed: {}", self.output, e);
        }
        result
    }
}

/// Output slot id paired with what its handler produced.
pub type Fired = (&'static str, Result<Figure, CallbackError>);

/// Dependency graph between input widgets and output slots.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two dashboard bindings: the pie follows the dropdown, the scatter
    /// follows the dropdown and the payload slider.
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(Callback::new(
            SUCCESS_PIE_CHART,
            &[SITE_DROPDOWN],
            |table, state| success_pie_chart(table, &state.site).map(Figure::Pie),
        ));
        registry.register(Callback::new(
            SUCCESS_PAYLOAD_SCATTER_CHART,
            &[SITE_DROPDOWN, PAYLOAD_SLIDER],
            |table, state| {
                success_payload_scatter_chart(table, &state.site, state.payload)
                    .map(Figure::Scatter)
            },
        ));
        registry
    }

    pub fn register(&mut self, callback: Callback) {
        self.callbacks.push(callback);
    }

    /// Fire every callback, as on first render.
    pub fn fire_all(&self, table: &LaunchTable, state: &WidgetState) -> Vec<Fired> {
        self.callbacks
            .iter()
            .map(|cb| (cb.output, cb.fire(table, state)))
            .collect()
    }

    /// Fire the callbacks with at least one input among `changed`.
    pub fn fire_changed(
        &self,
        table: &LaunchTable,
        state: &WidgetState,
        changed: &[&str],
    ) -> Vec<Fired> {
        self.callbacks
            .iter()
            .filter(|cb| changed.iter().any(|id| cb.depends_on(id)))
            .map(|cb| (cb.output, cb.fire(table, state)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BOOSTER_VERSION, CLASS, LAUNCH_SITE};
    use polars::prelude::*;

    /// Site A: 3 successes, 2 failures. Site B: 1 success, 1 failure.
    fn table() -> LaunchTable {
        let df = DataFrame::new(vec![
            Column::new(
                LAUNCH_SITE.into(),
                &["A", "A", "B", "A", "A", "B", "A"],
            ),
            Column::new(
                PAYLOAD_MASS.into(),
                &[0.0, 500.0, 1200.0, 2500.0, 4000.0, 6000.0, 9600.0],
            ),
            Column::new(CLASS.into(), &[1i64, 0, 1, 1, 0, 0, 1]),
            Column::new(
                BOOSTER_VERSION.into(),
                &["v1.0", "v1.0", "v1.1", "FT", "FT", "B4", "v1.0"],
            ),
        ])
        .unwrap();
        LaunchTable::from_dataframe(df).unwrap()
    }

    fn state(site: &str, low: f64, high: f64) -> WidgetState {
        WidgetState {
            site: site.to_string(),
            payload: PayloadRange::new(low, high),
        }
    }

    #[test]
    fn resolve_selection() {
        let table = table();
        assert_eq!(SiteSelection::resolve("ALL", &table).unwrap(), SiteSelection::All);
        assert_eq!(
            SiteSelection::resolve("B", &table).unwrap(),
            SiteSelection::Site("B")
        );
        assert!(matches!(
            SiteSelection::resolve("Z", &table),
            Err(CallbackError::UnmappedSelection(v)) if v == "Z"
        ));
    }

    #[test]
    fn pie_all_sites_counts_successes() {
        let pie = success_pie_chart(&table(), "ALL").unwrap();
        assert_eq!(pie.title, "Total Success Launches By Site");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.value_of("A"), Some(3.0));
        assert_eq!(pie.value_of("B"), Some(1.0));
        assert_eq!(pie.total(), 4.0);
    }

    #[test]
    fn pie_single_site_splits_outcomes() {
        let pie = success_pie_chart(&table(), "A").unwrap();
        assert_eq!(pie.title, "Total Success Launches for A");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "Success".into(), value: 3.0 },
                PieSlice { label: "Failure".into(), value: 2.0 },
            ]
        );
    }

    #[test]
    fn pie_rejects_unmapped_site() {
        assert!(matches!(
            success_pie_chart(&table(), "nowhere"),
            Err(CallbackError::UnmappedSelection(_))
        ));
    }

    #[test]
    fn scatter_all_sites_ignores_payload_range() {
        let chart =
            success_payload_scatter_chart(&table(), "ALL", PayloadRange::new(0.0, 100.0)).unwrap();
        assert_eq!(chart.point_count(), 7);
        assert_eq!(
            chart.title,
            "Correlation Between Payload and Success For All Sites"
        );
        assert_eq!(chart.x_label, "Payload Mass (kg)");
        assert_eq!(chart.y_label, "class");

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["v1.0", "v1.1", "FT", "B4"]);
        assert_eq!(chart.series[0].points.len(), 3);
    }

    #[test]
    fn scatter_site_applies_inclusive_range() {
        let chart =
            success_payload_scatter_chart(&table(), "A", PayloadRange::new(500.0, 4000.0))
                .unwrap();
        assert_eq!(chart.title, "Correlation Between Payload and Success For A Site");

        let payloads: Vec<f64> = chart.points().map(|p| p.payload_kg).collect();
        assert_eq!(payloads.len(), 3);
        assert!(payloads.iter().all(|p| (500.0..=4000.0).contains(p)));
    }

    #[test]
    fn scatter_empty_range_gives_empty_chart() {
        let chart =
            success_payload_scatter_chart(&table(), "B", PayloadRange::new(7000.0, 8000.0))
                .unwrap();
        assert!(chart.series.is_empty());
        assert_eq!(chart.point_count(), 0);
    }

    #[test]
    fn fire_changed_only_runs_dependents() {
        let table = table();
        let registry = CallbackRegistry::dashboard();
        let state = state("A", 0.0, 10000.0);

        let fired = registry.fire_changed(&table, &state, &[PAYLOAD_SLIDER]);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, SUCCESS_PAYLOAD_SCATTER_CHART);

        let fired = registry.fire_changed(&table, &state, &[SITE_DROPDOWN]);
        let outputs: Vec<&str> = fired.iter().map(|(id, _)| *id).collect();
        assert_eq!(outputs, [SUCCESS_PIE_CHART, SUCCESS_PAYLOAD_SCATTER_CHART]);

        assert!(registry.fire_changed(&table, &state, &[]).is_empty());
    }

    #[test]
    fn fire_all_reports_errors_per_slot() {
        let table = table();
        let registry = CallbackRegistry::dashboard();

        let fired = registry.fire_all(&table, &state("Z", 0.0, 10000.0));
        assert_eq!(fired.len(), 2);
        assert!(fired.iter().all(|(_, r)| r.is_err()));

        let fired = registry.fire_all(&table, &state("ALL", 0.0, 10000.0));
        assert!(matches!(fired[0].1, Ok(Figure::Pie(_))));
        assert!(matches!(fired[1].1, Ok(Figure::Scatter(_))));
    }
}
