use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::bar_frame_builder::{build_bar_frame, nearest_bar_index};
use super::chart_config::ChartConfig;
use super::render_command::InfoText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeSeverity {
    /// The application cannot continue (dataset failed to load).
    Blocking,
    /// The request was refused; the current view stays as it was.
    Informational,
}

/// User-visible message raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn for_error(error: &ChartError) -> Self {
        match error {
            ChartError::DatasetLoad { location, .. } => Self {
                severity: NoticeSeverity::Blocking,
                message: format!(
                    "Error loading data. Please ensure {location} is in the same directory."
                ),
            },
            ChartError::EmptySelection { level, .. } => Self {
                severity: NoticeSeverity::Informational,
                message: format!("Geen maatregelen gevonden voor deze {level}."),
            },
            ChartError::MissingSubsectorData => Self {
                severity: NoticeSeverity::Informational,
                message: "Geen subsector data gevonden voor industrie.".to_owned(),
            },
            ChartError::InvalidTransition { .. } => Self {
                severity: NoticeSeverity::Informational,
                message: "Deze actie is in deze weergave niet mogelijk.".to_owned(),
            },
            other => Self {
                severity: if other.is_recoverable() {
                    NoticeSeverity::Informational
                } else {
                    NoticeSeverity::Blocking
                },
                message: other.to_string(),
            },
        }
    }
}

/// UI collaborator driven by the view controller.
///
/// The controller destroys the previous chart before every `create_chart`,
/// so at most one chart is alive at a time.
pub trait ChartSurface {
    type Chart;

    fn create_chart(&mut self, config: &ChartConfig) -> ChartResult<Self::Chart>;
    fn destroy_chart(&mut self, chart: Self::Chart);
    fn set_back_visible(&mut self, visible: bool);
    fn set_info_text(&mut self, info: &InfoText);
    fn show_notice(&mut self, notice: &Notice);

    /// Maps a pointer position to a bar index of `chart`.
    fn hit_test(&self, _chart: &Self::Chart, _x: f64, _y: f64) -> Option<usize> {
        None
    }
}

/// Handle for a chart created by `FrameSurface`.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameChart {
    id: u64,
}

impl FrameChart {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Notices kept by `FrameSurface` before the oldest are dropped.
pub const MAX_RETAINED_NOTICES: usize = 64;

/// Headless surface: turns every chart config into a `RenderFrame` and
/// hands it to a `Renderer`.
#[derive(Debug)]
pub struct FrameSurface<R: Renderer> {
    renderer: R,
    viewport: Viewport,
    next_chart_id: u64,
    live_charts: usize,
    live_frame: Option<(u64, RenderFrame)>,
    back_visible: bool,
    info: Option<InfoText>,
    notices: Vec<Notice>,
}

impl<R: Renderer> FrameSurface<R> {
    pub fn new(renderer: R, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            renderer,
            viewport,
            next_chart_id: 1,
            live_charts: 0,
            live_frame: None,
            back_visible: false,
            info: None,
            notices: Vec::new(),
        })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.live_charts
    }

    #[must_use]
    pub fn charts_created(&self) -> u64 {
        self.next_chart_id - 1
    }

    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.live_frame.as_ref().map(|(_, frame)| frame)
    }

    #[must_use]
    pub fn back_visible(&self) -> bool {
        self.back_visible
    }

    #[must_use]
    pub fn info(&self) -> Option<&InfoText> {
        self.info.as_ref()
    }

    /// Most recent notices, oldest first, at most `MAX_RETAINED_NOTICES`.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands the pending notices to the caller and clears them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Re-renders the live frame, for example after the host invalidated it.
    pub fn redraw(&mut self) -> ChartResult<()> {
        match &self.live_frame {
            Some((_, frame)) => self.renderer.render(frame),
            None => Ok(()),
        }
    }
}

impl<R: Renderer> ChartSurface for FrameSurface<R> {
    type Chart = FrameChart;

    fn create_chart(&mut self, config: &ChartConfig) -> ChartResult<FrameChart> {
        let frame = build_bar_frame(config, self.viewport)?;
        self.renderer.render(&frame)?;

        let id = self.next_chart_id;
        self.next_chart_id += 1;
        self.live_charts += 1;
        self.live_frame = Some((id, frame));
        trace!(chart_id = id, bars = config.bar_count(), "chart created");
        Ok(FrameChart { id })
    }

    fn destroy_chart(&mut self, chart: FrameChart) {
        self.live_charts = self.live_charts.saturating_sub(1);
        if self
            .live_frame
            .as_ref()
            .is_some_and(|(id, _)| *id == chart.id)
        {
            self.live_frame = None;
        }
        trace!(chart_id = chart.id, "chart destroyed");
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.back_visible = visible;
    }

    fn set_info_text(&mut self, info: &InfoText) {
        self.info = Some(info.clone());
    }

    fn show_notice(&mut self, notice: &Notice) {
        if self.notices.len() >= MAX_RETAINED_NOTICES {
            let overflow = self.notices.len() + 1 - MAX_RETAINED_NOTICES;
            self.notices.drain(..overflow);
        }
        self.notices.push(notice.clone());
    }

    fn hit_test(&self, chart: &FrameChart, _x: f64, y: f64) -> Option<usize> {
        match &self.live_frame {
            Some((id, frame)) if *id == chart.id => nearest_bar_index(frame, y),
            _ => None,
        }
    }
}
