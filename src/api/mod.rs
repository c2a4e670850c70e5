mod bar_frame_builder;
mod chart_config;
mod config;
mod data_loader;
mod json_contract;
mod money;
mod render_command;
mod surface;
mod view_controller;

pub use bar_frame_builder::{PlotArea, build_bar_frame, nearest_bar_index};
pub use chart_config::{
    Axis, AxisTitleOptions, BarDataset, CategoryAxisOptions, CategoryGridOptions, ChartConfig,
    ChartData, ChartOptions, ChartType, FontSpec, HitMode, InteractionOptions, LegendOptions,
    PluginOptions, ScaleOptions, TickOptions, TitleOptions, TooltipOptions, VALUE_AXIS_TITLE,
    ValueAxisOptions, ValueGridOptions,
};
pub use config::{ChartTheme, DEFAULT_INDUSTRIE_SECTOR_KEY, SectorChartConfig};
pub use data_loader::{
    DEFAULT_DATASET_PATH, DatasetSource, FileDatasetSource, StaticDatasetSource, load_dataset,
};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ViewJsonContractV1};
pub use money::{format_axis_tick, format_fixed, format_millions};
pub use render_command::{
    AMOUNT_DATASET_LABEL, InfoText, SECTOR_HINT, SECTOR_TITLE, SUBSECTOR_HINT,
    TOTAL_DATASET_LABEL, ViewCommand, build_view_command,
};
pub use surface::{
    ChartSurface, FrameChart, FrameSurface, MAX_RETAINED_NOTICES, Notice, NoticeSeverity,
};
pub use view_controller::{NavigationOutcome, ViewController};
