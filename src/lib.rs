//! sector-chart: drill-down budget bar chart controller.
//!
//! A dataset of sector totals is shown as a horizontal bar chart. Clicking a
//! sector drills into its policy measures; the Industrie sector drills into
//! subsectors first. Transforms and navigation are pure and testable without
//! any UI; rendering goes through the `api::ChartSurface` seam.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{SectorChartConfig, ViewController};
pub use error::{ChartError, ChartResult};
