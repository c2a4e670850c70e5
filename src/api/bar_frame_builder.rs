use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::chart_config::ChartConfig;

const TITLE_BAND_PX: f64 = 48.0;
const AXIS_BAND_PX: f64 = 48.0;
const RIGHT_PADDING_PX: f64 = 24.0;
const LABEL_GUTTER_RATIO: f64 = 0.3;
const LABEL_GUTTER_MIN_PX: f64 = 120.0;
const LABEL_GUTTER_MAX_PX: f64 = 320.0;
const LABEL_GAP_PX: f64 = 8.0;
const BAR_THICKNESS_RATIO: f64 = 0.72;
const TICK_FONT_PX: f64 = 11.0;
const CATEGORY_FONT_PX: f64 = 12.0;
const AXIS_TITLE_FONT_PX: f64 = 12.0;
const TARGET_TICK_COUNT: usize = 6;

/// Pixel rectangle that holds the bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn for_viewport(viewport: Viewport) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid());
        }
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let left = (width * LABEL_GUTTER_RATIO).clamp(LABEL_GUTTER_MIN_PX, LABEL_GUTTER_MAX_PX);
        let area = Self {
            left,
            top: TITLE_BAND_PX,
            right: width - RIGHT_PADDING_PX,
            bottom: height - AXIS_BAND_PX,
        };
        // Title band, axis band and label gutter must leave a plot rect.
        if area.right <= area.left || area.bottom <= area.top {
            return Err(invalid());
        }
        Ok(area)
    }

    #[must_use]
    pub fn band_height(self, bar_count: usize) -> f64 {
        (self.bottom - self.top) / bar_count.max(1) as f64
    }
}

/// Materializes a horizontal bar `ChartConfig` into draw primitives.
///
/// `frame.bars[i]` corresponds to `config.data.labels[i]`; bars run top to
/// bottom in series order and grow left or right from the zero line.
pub fn build_bar_frame(config: &ChartConfig, viewport: Viewport) -> ChartResult<RenderFrame> {
    config.validate()?;
    let bars = config.bars()?;
    let area = PlotArea::for_viewport(viewport)?;
    let scale = LinearScale::zero_anchored(&bars.data, area.left, area.right)?;

    let options = &config.options;
    let value_axis = &options.scales.x;
    let text_color = Color::from_hex(&value_axis.ticks.color)?;
    let grid_color = Color::from_hex(&value_axis.grid.color)?;
    let zero_color = Color::from_hex(&value_axis.grid.zero_line_color)?;
    let category_grid_color = Color::from_hex(&options.scales.y.grid.color)?;
    let title_color = Color::from_hex(&options.plugins.title.color)?;

    let mut frame = RenderFrame::new(viewport);

    for tick in scale.ticks(TARGET_TICK_COUNT) {
        let x = scale.domain_to_pixel(tick)?;
        let (color, width) = if tick == 0.0 {
            (zero_color, value_axis.grid.zero_line_width)
        } else {
            (grid_color, value_axis.grid.line_width)
        };
        frame = frame
            .with_line(LinePrimitive::new(x, area.top, x, area.bottom, width, color))
            .with_text(TextPrimitive::new(
                ChartConfig::tick_label(tick),
                x,
                area.bottom + TICK_FONT_PX,
                TICK_FONT_PX,
                text_color,
                TextHAlign::Center,
            ));
    }

    let band = area.band_height(bars.data.len());
    let zero_x = scale.domain_to_pixel(0.0)?;
    for (index, amount) in bars.data.iter().copied().enumerate() {
        let band_top = area.top + band * index as f64;
        let thickness = band * BAR_THICKNESS_RATIO;
        let value_x = scale.domain_to_pixel(amount)?;
        let fill = Color::from_hex(&bars.background_color[index])?;
        let border = Color::from_hex(&bars.border_color[index])?;

        frame = frame
            .with_line(LinePrimitive::new(
                area.left,
                band_top + band,
                area.right,
                band_top + band,
                1.0,
                category_grid_color,
            ))
            .with_bar(
                RectPrimitive::new(
                    zero_x.min(value_x),
                    band_top + (band - thickness) / 2.0,
                    (value_x - zero_x).abs(),
                    thickness,
                    fill,
                )
                .with_border(bars.border_width, border),
            )
            .with_text(TextPrimitive::new(
                config.data.labels[index].clone(),
                area.left - LABEL_GAP_PX,
                band_top + band / 2.0,
                CATEGORY_FONT_PX,
                text_color,
                TextHAlign::Right,
            ));
    }

    let title = &options.plugins.title;
    if title.display && !title.text.is_empty() {
        frame = frame.with_text(
            TextPrimitive::new(
                title.text.clone(),
                f64::from(viewport.width) / 2.0,
                TITLE_BAND_PX / 2.0,
                title.font.size.unwrap_or(18.0),
                title_color,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    if value_axis.title.display && !value_axis.title.text.is_empty() {
        frame = frame.with_text(TextPrimitive::new(
            value_axis.title.text.clone(),
            (area.left + area.right) / 2.0,
            f64::from(viewport.height) - AXIS_TITLE_FONT_PX,
            AXIS_TITLE_FONT_PX,
            text_color,
            TextHAlign::Center,
        ));
    }

    Ok(frame)
}

/// Index of the bar nearest to `y`, measured along the category axis.
///
/// Matches "nearest, axis y, no intersect" hit testing: any pointer position
/// resolves to a bar as long as the chart has one.
#[must_use]
pub fn nearest_bar_index(frame: &RenderFrame, y: f64) -> Option<usize> {
    if !y.is_finite() {
        return None;
    }
    frame
        .bars
        .iter()
        .enumerate()
        .map(|(index, bar)| (index, (bar.y + bar.height / 2.0 - y).abs()))
        .min_by(|left, right| left.1.total_cmp(&right.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{PlotArea, build_bar_frame, nearest_bar_index};
    use crate::api::chart_config::ChartConfig;
    use crate::api::config::ChartTheme;
    use crate::core::{LabelKind, SignPalette, Viewport, build_bar_series};

    fn config() -> ChartConfig {
        let series = build_bar_series(
            [("A Landbouw", 5.0), ("C Industrie", -12.5), ("B Mijnbouw", 12.5)],
            LabelKind::Sector,
            &SignPalette::default(),
        );
        ChartConfig::horizontal_bar(&series, "Totaal", "Titel", 20.0, true, &ChartTheme::default())
    }

    #[test]
    fn positive_and_negative_bars_meet_at_the_zero_line() {
        let frame = build_bar_frame(&config(), Viewport::new(900, 600)).expect("frame");
        assert_eq!(frame.bars.len(), 3);

        let positive = frame.bars[0];
        let negative = frame.bars[1];
        assert_relative_eq!(negative.x + negative.width, positive.x, epsilon = 1e-9);
        assert_relative_eq!(positive.width, negative.width, epsilon = 1e-9);
        assert!(frame.bars[2].width < positive.width);
    }

    #[test]
    fn zero_gridline_is_emphasized() {
        let frame = build_bar_frame(&config(), Viewport::new(900, 600)).expect("frame");
        let widest = frame
            .lines
            .iter()
            .map(|line| line.stroke_width)
            .fold(0.0_f64, f64::max);
        assert_relative_eq!(widest, 2.0);
        assert!(frame.texts.iter().any(|text| text.text == "€0M"));
    }

    #[test]
    fn bars_run_top_to_bottom_in_series_order() {
        let frame = build_bar_frame(&config(), Viewport::new(900, 600)).expect("frame");
        assert!(frame.bars[0].y < frame.bars[1].y);
        assert!(frame.bars[1].y < frame.bars[2].y);
    }

    #[test]
    fn nearest_hit_resolves_anywhere_along_the_band() {
        let frame = build_bar_frame(&config(), Viewport::new(900, 600)).expect("frame");
        let area = PlotArea::for_viewport(Viewport::new(900, 600)).expect("area");
        let band = area.band_height(3);

        assert_eq!(nearest_bar_index(&frame, area.top + 1.0), Some(0));
        assert_eq!(nearest_bar_index(&frame, area.top + band * 1.5), Some(1));
        assert_eq!(nearest_bar_index(&frame, area.bottom + 40.0), Some(2));
        assert_eq!(nearest_bar_index(&frame, f64::NAN), None);
    }

    #[test]
    fn tiny_viewport_is_rejected() {
        assert!(build_bar_frame(&config(), Viewport::new(100, 60)).is_err());
    }
}
