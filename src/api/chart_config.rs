use serde::{Deserialize, Serialize};

use crate::core::BarSeries;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::config::ChartTheme;
use super::money::{format_axis_tick, format_millions};

pub const VALUE_AXIS_TITLE: &str = "Bedrag (miljoen €)";

/// Declarative bar chart description handed to the chart surface.
///
/// Field names serialize in the shape web charting libraries expect, so the
/// JSON contract can be fed to one directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: f64,
    /// Hover labels, index-aligned with `data`.
    pub full_names: Vec<String>,
    /// Unformatted keys used to resolve clicks, index-aligned with `data`.
    pub original_keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitMode {
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    pub mode: HitMode,
    pub axis: Axis,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: Option<f64>,
    pub weight: String,
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font: FontSpec,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
}

/// Tooltip text rules: the title comes from `fullNames`, the body line is
/// the amount rendered with `label_template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub title_source: String,
    pub label_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
}

/// Gridlines on the value axis; the zero line is drawn with its own style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueGridOptions {
    pub color: String,
    pub line_width: f64,
    pub zero_line_color: String,
    pub zero_line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    pub color: String,
    pub font: FontSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitleOptions {
    pub display: bool,
    pub text: String,
    pub color: String,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxisOptions {
    pub begin_at_zero: bool,
    pub grid: ValueGridOptions,
    pub ticks: TickOptions,
    pub title: AxisTitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGridOptions {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxisOptions {
    pub grid: CategoryGridOptions,
    pub ticks: TickOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    pub x: ValueAxisOptions,
    pub y: CategoryAxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub index_axis: Axis,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: InteractionOptions,
    pub plugins: PluginOptions,
    pub scales: ScaleOptions,
    /// Whether a bar click drills down further.
    pub drill_down: bool,
}

impl ChartConfig {
    /// Builds a horizontal bar chart for `series`.
    #[must_use]
    pub fn horizontal_bar(
        series: &BarSeries,
        dataset_label: &str,
        title: &str,
        title_font_size: f64,
        drill_down: bool,
        theme: &ChartTheme,
    ) -> Self {
        let colors = series.colors();
        let font = |size: Option<f64>, weight: &str| FontSpec {
            size,
            weight: weight.to_owned(),
            family: theme.font_family.clone(),
        };

        Self {
            chart_type: ChartType::Bar,
            data: ChartData {
                labels: series.labels(),
                datasets: vec![BarDataset {
                    label: dataset_label.to_owned(),
                    data: series.amounts(),
                    background_color: colors.clone(),
                    border_color: colors,
                    border_width: theme.bar_border_width,
                    full_names: series.full_labels(),
                    original_keys: series.original_keys(),
                }],
            },
            options: ChartOptions {
                index_axis: Axis::Y,
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: InteractionOptions {
                    mode: HitMode::Nearest,
                    axis: Axis::Y,
                    intersect: false,
                },
                plugins: PluginOptions {
                    title: TitleOptions {
                        display: true,
                        text: title.to_owned(),
                        font: font(Some(title_font_size), "bold"),
                        color: theme.text_color.clone(),
                    },
                    legend: LegendOptions { display: false },
                    tooltip: TooltipOptions {
                        title_source: "fullNames".to_owned(),
                        label_template: "€{value:.1} miljoen".to_owned(),
                    },
                },
                scales: ScaleOptions {
                    x: ValueAxisOptions {
                        begin_at_zero: true,
                        grid: ValueGridOptions {
                            color: theme.grid_color.clone(),
                            line_width: theme.grid_line_width,
                            zero_line_color: theme.zero_line_color.clone(),
                            zero_line_width: theme.zero_line_width,
                        },
                        ticks: TickOptions {
                            color: theme.text_color.clone(),
                            font: font(None, "500"),
                            label_template: Some("€{value:.0}M".to_owned()),
                        },
                        title: AxisTitleOptions {
                            display: true,
                            text: VALUE_AXIS_TITLE.to_owned(),
                            color: theme.text_color.clone(),
                            font: font(None, "600"),
                        },
                    },
                    y: CategoryAxisOptions {
                        grid: CategoryGridOptions {
                            color: theme.grid_color.clone(),
                        },
                        ticks: TickOptions {
                            color: theme.text_color.clone(),
                            font: font(None, "500"),
                            label_template: None,
                        },
                    },
                },
                drill_down,
            },
        }
    }

    /// The single bar dataset every view carries.
    pub fn bars(&self) -> ChartResult<&BarDataset> {
        self.data
            .datasets
            .first()
            .ok_or_else(|| ChartError::InvalidData("chart config has no dataset".to_owned()))
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.data.labels.len()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }

    /// Hover title for bar `index`.
    #[must_use]
    pub fn tooltip_title(&self, index: usize) -> Option<&str> {
        let bars = self.data.datasets.first()?;
        bars.full_names
            .get(index)
            .or_else(|| self.data.labels.get(index))
            .map(String::as_str)
    }

    /// Hover body line for bar `index`.
    #[must_use]
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let bars = self.data.datasets.first()?;
        bars.data.get(index).map(|amount| format_millions(*amount))
    }

    #[must_use]
    pub fn tick_label(value: f64) -> String {
        format_axis_tick(value)
    }

    /// Checks that per-bar arrays line up and colors parse.
    pub fn validate(&self) -> ChartResult<()> {
        let bars = self.bars()?;
        let count = self.data.labels.len();
        for (name, len) in [
            ("data", bars.data.len()),
            ("backgroundColor", bars.background_color.len()),
            ("borderColor", bars.border_color.len()),
            ("fullNames", bars.full_names.len()),
            ("originalKeys", bars.original_keys.len()),
        ] {
            if len != count {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{name}` has {len} entries, expected {count}"
                )));
            }
        }
        for color in bars.background_color.iter().chain(&bars.border_color) {
            Color::from_hex(color)?;
        }
        Color::from_hex(&self.options.scales.x.grid.color)?;
        Color::from_hex(&self.options.scales.x.grid.zero_line_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::api::config::ChartTheme;
    use crate::core::{LabelKind, SignPalette, build_bar_series};

    fn config() -> ChartConfig {
        let series = build_bar_series(
            [("A Landbouw", 5.0), ("B Mijnbouw", -12.5)],
            LabelKind::Sector,
            &SignPalette::default(),
        );
        ChartConfig::horizontal_bar(
            &series,
            "Totaal bedrag (miljoen €)",
            "Totaal bedrag per sector (miljoen €)",
            20.0,
            true,
            &ChartTheme::default(),
        )
    }

    #[test]
    fn serializes_in_web_chart_shape() {
        let value = serde_json::to_value(config()).expect("serialize");
        assert_eq!(value["type"], "bar");
        assert_eq!(value["options"]["indexAxis"], "y");
        assert_eq!(value["options"]["interaction"]["mode"], "nearest");
        assert_eq!(value["options"]["scales"]["x"]["beginAtZero"], true);
        assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(
            value["data"]["datasets"][0]["originalKeys"][0],
            "B Mijnbouw"
        );
    }

    #[test]
    fn tooltips_use_full_names_and_one_decimal_amounts() {
        let config = config();
        assert_eq!(config.tooltip_title(0), Some("Mijnbouw"));
        assert_eq!(config.tooltip_label(0).as_deref(), Some("€-12.5 miljoen"));
        assert_eq!(config.tooltip_label(2), None);
        assert_eq!(ChartConfig::tick_label(-10.0), "€-10M");
    }

    #[test]
    fn misaligned_arrays_fail_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());
        config.data.datasets[0].full_names.pop();
        assert!(config.validate().is_err());
    }
}
