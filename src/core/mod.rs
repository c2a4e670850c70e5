pub mod dataset;
pub mod labels;
pub mod ledger;
pub mod scale;
pub mod series;
pub mod types;

pub use dataset::{Dataset, IndustrieSubsectors, Measure};
pub use labels::{LabelKind, format_measure_name, format_sector_name, format_subsector_name};
pub use ledger::{DatasetBuilder, LedgerAggregate, LedgerRow, aggregate_ledger};
pub use scale::LinearScale;
pub use series::{
    BarEntry, BarSeries, SignPalette, bar_color_for_amount, build_bar_series,
    build_measure_series, magnitude_order, sort_by_magnitude,
};
pub use types::Viewport;
