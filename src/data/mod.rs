//! Data module - CSV loading and derived views

mod loader;
mod processor;

pub use loader::{DataLoader, LaunchTable, LoaderError};
pub use processor::{DataProcessor, LaunchRecord, PayloadRange, ProcessorError};

/// Launch site identifier column.
pub const LAUNCH_SITE: &str = "Launch Site";
/// Payload mass in kilograms.
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
/// Outcome class, 1 for success and 0 for failure.
pub const CLASS: &str = "class";
/// Booster version, used to color scatter points.
pub const BOOSTER_VERSION: &str = "Booster Version";

/// Columns every launch records file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [LAUNCH_SITE, PAYLOAD_MASS, CLASS, BOOSTER_VERSION];
