use serde::{Deserialize, Serialize};

use crate::core::{SignPalette, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::bar_frame_builder::PlotArea;
use super::data_loader::DEFAULT_DATASET_PATH;

pub const DEFAULT_INDUSTRIE_SECTOR_KEY: &str = "C Industrie";

/// Fixed styling shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_text_color")]
    pub zero_line_color: String,
    #[serde(default = "default_grid_line_width")]
    pub grid_line_width: f64,
    #[serde(default = "default_zero_line_width")]
    pub zero_line_width: f64,
    #[serde(default = "default_bar_border_width")]
    pub bar_border_width: f64,
    #[serde(default = "default_sector_title_font_size")]
    pub sector_title_font_size: f64,
    #[serde(default = "default_drill_title_font_size")]
    pub drill_title_font_size: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            text_color: default_text_color(),
            grid_color: default_grid_color(),
            zero_line_color: default_text_color(),
            grid_line_width: default_grid_line_width(),
            zero_line_width: default_zero_line_width(),
            bar_border_width: default_bar_border_width(),
            sector_title_font_size: default_sector_title_font_size(),
            drill_title_font_size: default_drill_title_font_size(),
        }
    }
}

/// Public controller bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorChartConfig {
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_industrie_sector_key")]
    pub industrie_sector_key: String,
    #[serde(default)]
    pub palette: SignPalette,
    #[serde(default)]
    pub theme: ChartTheme,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for SectorChartConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            industrie_sector_key: default_industrie_sector_key(),
            palette: SignPalette::default(),
            theme: ChartTheme::default(),
            viewport: Viewport::default(),
        }
    }
}

impl SectorChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<String>) -> Self {
        self.data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_industrie_sector_key(mut self, key: impl Into<String>) -> Self {
        self.industrie_sector_key = key.into();
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: SignPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.industrie_sector_key.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "industrie sector key must not be empty".to_owned(),
            ));
        }
        PlotArea::for_viewport(self.viewport)?;
        for color in [
            &self.palette.positive,
            &self.palette.negative,
            &self.theme.text_color,
            &self.theme.grid_color,
            &self.theme.zero_line_color,
        ] {
            Color::from_hex(color)?;
        }
        for (name, width) in [
            ("grid line width", self.theme.grid_line_width),
            ("zero line width", self.theme.zero_line_width),
            ("sector title font size", self.theme.sector_title_font_size),
            ("drill title font size", self.theme.drill_title_font_size),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.theme.bar_border_width.is_finite() || self.theme.bar_border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "bar border width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_data_path() -> String {
    DEFAULT_DATASET_PATH.to_owned()
}

fn default_industrie_sector_key() -> String {
    DEFAULT_INDUSTRIE_SECTOR_KEY.to_owned()
}

fn default_font_family() -> String {
    "DM Sans".to_owned()
}

fn default_text_color() -> String {
    "#1f497d".to_owned()
}

fn default_grid_color() -> String {
    "#f4ede3".to_owned()
}

fn default_grid_line_width() -> f64 {
    1.0
}

fn default_zero_line_width() -> f64 {
    2.0
}

fn default_bar_border_width() -> f64 {
    1.0
}

fn default_sector_title_font_size() -> f64 {
    20.0
}

fn default_drill_title_font_size() -> f64 {
    18.0
}
