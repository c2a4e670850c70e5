use serde::{Deserialize, Serialize};

use crate::core::labels::{format_sector_name, format_subsector_name};
use crate::core::{BarSeries, Dataset, LabelKind, build_bar_series, build_measure_series};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{NavigationState, View};

use super::chart_config::ChartConfig;
use super::config::SectorChartConfig;
use super::money::format_millions;

pub const SECTOR_TITLE: &str = "Totaal bedrag per sector (miljoen €)";
pub const TOTAL_DATASET_LABEL: &str = "Totaal bedrag (miljoen €)";
pub const AMOUNT_DATASET_LABEL: &str = "Bedrag (miljoen €)";
pub const SECTOR_HINT: &str =
    "Klik op een sector om de onderliggende beleidsmaatregelen te bekijken";
pub const SUBSECTOR_HINT: &str =
    "Klik op een subsector om de onderliggende beleidsmaatregelen te bekijken";

/// Text shown next to the chart: an optional bold heading and plain lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoText {
    pub heading: Option<String>,
    pub lines: Vec<String>,
}

impl InfoText {
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.heading
            .iter()
            .chain(&self.lines)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Everything the surface needs to show one navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCommand {
    pub view: View,
    pub config: ChartConfig,
    pub series: BarSeries,
    pub info: InfoText,
    pub back_visible: bool,
}

/// Builds the chart config and surrounding text for `state`.
///
/// Stateless; invoked again on every transition.
pub fn build_view_command(
    state: &NavigationState,
    dataset: &Dataset,
    config: &SectorChartConfig,
) -> ChartResult<ViewCommand> {
    let theme = &config.theme;
    let palette = &config.palette;

    let (series, chart, info) = match state.view() {
        View::Sectors => {
            let series = build_bar_series(
                dataset
                    .sector_totals
                    .iter()
                    .map(|(sector, total)| (sector.as_str(), *total)),
                LabelKind::Sector,
                palette,
            );
            let chart = ChartConfig::horizontal_bar(
                &series,
                TOTAL_DATASET_LABEL,
                SECTOR_TITLE,
                theme.sector_title_font_size,
                true,
                theme,
            );
            let info = InfoText {
                heading: None,
                lines: vec![SECTOR_HINT.to_owned()],
            };
            (series, chart, info)
        }
        View::Subsectors => {
            let subsectors = dataset.subsectors().ok_or(ChartError::MissingSubsectorData)?;
            let series = build_bar_series(
                subsectors
                    .subsector_totals
                    .iter()
                    .map(|(subsector, total)| (subsector.as_str(), *total)),
                LabelKind::Subsector,
                palette,
            );
            let sector_name = format_sector_name(&config.industrie_sector_key);
            let chart = ChartConfig::horizontal_bar(
                &series,
                TOTAL_DATASET_LABEL,
                &format!("Subsectoren: {sector_name}"),
                theme.drill_title_font_size,
                true,
                theme,
            );
            let info = InfoText {
                heading: Some(format!("{sector_name} - Subsectoren")),
                lines: vec![
                    summary_line(&series, "subsectoren"),
                    SUBSECTOR_HINT.to_owned(),
                ],
            };
            (series, chart, info)
        }
        View::Measures => {
            let (measures, name) = match (state.current_sector(), state.current_subsector()) {
                (_, Some(subsector)) => {
                    let measures = dataset
                        .subsectors()
                        .ok_or(ChartError::MissingSubsectorData)?
                        .measures(subsector);
                    (measures, format_subsector_name(subsector))
                }
                (Some(sector), None) => {
                    (dataset.sector_measures(sector), format_sector_name(sector))
                }
                (None, None) => {
                    return Err(ChartError::InvalidData(
                        "measure view requires a selected sector".to_owned(),
                    ));
                }
            };
            let series = build_measure_series(measures, palette);
            let chart = ChartConfig::horizontal_bar(
                &series,
                AMOUNT_DATASET_LABEL,
                &format!("Beleidsmaatregelen: {name}"),
                theme.drill_title_font_size,
                false,
                theme,
            );
            let info = InfoText {
                heading: Some(name),
                lines: vec![summary_line(&series, "maatregelen")],
            };
            (series, chart, info)
        }
    };

    Ok(ViewCommand {
        view: state.view(),
        config: chart,
        series,
        info,
        back_visible: state.back_visible(),
    })
}

fn summary_line(series: &BarSeries, noun: &str) -> String {
    format!(
        "Totaal: {} verdeeld over {} {noun}",
        format_millions(series.total()),
        series.len()
    )
}
