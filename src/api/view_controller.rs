use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::core::{BarSeries, Dataset};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{NavigationEvent, NavigationState, View};

use super::config::SectorChartConfig;
use super::data_loader::{DatasetSource, load_dataset};
use super::render_command::{ViewCommand, build_view_command};
use super::surface::{ChartSurface, Notice};

/// Result of a navigation request that did not fail hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The view changed and was re-rendered.
    Changed(View),
    /// The request was refused or ignored; nothing was re-rendered.
    Unchanged,
}

/// Composition root: dataset, navigation state and the chart surface.
///
/// All mutation happens through `start`, `click_bar`, `click_at` and `back`,
/// which the host calls from its single-threaded event loop.
#[derive(Debug)]
pub struct ViewController<S: ChartSurface> {
    surface: S,
    config: SectorChartConfig,
    dataset: Option<Arc<Dataset>>,
    state: NavigationState,
    chart: Option<S::Chart>,
    series: Option<BarSeries>,
}

impl<S: ChartSurface> ViewController<S> {
    pub fn new(surface: S, config: SectorChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            config,
            dataset: None,
            state: NavigationState::sectors(),
            chart: None,
            series: None,
        })
    }

    /// Loads the dataset and shows the sector view.
    ///
    /// A load failure raises a blocking notice, leaves the dataset unset and
    /// is returned to the caller.
    pub fn start(&mut self, source: &dyn DatasetSource) -> ChartResult<()> {
        match load_dataset(source) {
            Ok(dataset) => self.start_with_dataset(Arc::new(dataset)),
            Err(err) => {
                error!(error = %err, "sector chart is not functional without a dataset");
                self.surface.show_notice(&Notice::for_error(&err));
                Err(err)
            }
        }
    }

    /// Shows the sector view for an already loaded dataset.
    pub fn start_with_dataset(&mut self, dataset: Arc<Dataset>) -> ChartResult<()> {
        self.dataset = Some(Arc::clone(&dataset));
        self.render(NavigationState::sectors(), &dataset)
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.state.view()
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &SectorChartConfig {
        &self.config
    }

    /// Series currently on screen, index-aligned with the drawn bars.
    #[must_use]
    pub fn current_series(&self) -> Option<&BarSeries> {
        self.series.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Handles a click on bar `index` of the current chart.
    ///
    /// Measure bars are leaves, and indices outside the series are ignored.
    pub fn click_bar(&mut self, index: usize) -> ChartResult<NavigationOutcome> {
        let Some(key) = self
            .series
            .as_ref()
            .and_then(|series| series.original_key_at(index))
            .map(str::to_owned)
        else {
            debug!(index, "click outside of the current series");
            return Ok(NavigationOutcome::Unchanged);
        };

        let event = match self.state.view() {
            View::Sectors => NavigationEvent::SelectSector(key),
            View::Subsectors => NavigationEvent::SelectSubsector(key),
            View::Measures => return Ok(NavigationOutcome::Unchanged),
        };
        self.dispatch(event)
    }

    /// Resolves a pointer position through the surface hit test, then
    /// behaves like `click_bar`.
    pub fn click_at(&mut self, x: f64, y: f64) -> ChartResult<NavigationOutcome> {
        let index = self
            .chart
            .as_ref()
            .and_then(|chart| self.surface.hit_test(chart, x, y));
        match index {
            Some(index) => self.click_bar(index),
            None => Ok(NavigationOutcome::Unchanged),
        }
    }

    pub fn back(&mut self) -> ChartResult<NavigationOutcome> {
        self.dispatch(NavigationEvent::Back)
    }

    /// Applies `event` and re-renders on success.
    ///
    /// Recoverable rejections raise an informational notice and keep the
    /// current state and chart.
    pub fn dispatch(&mut self, event: NavigationEvent) -> ChartResult<NavigationOutcome> {
        let dataset = self.dataset.clone().ok_or(ChartError::DatasetNotLoaded)?;

        match self
            .state
            .transition(&event, &dataset, &self.config.industrie_sector_key)
        {
            Ok(next) => {
                let view = next.view();
                self.render(next, &dataset)?;
                Ok(NavigationOutcome::Changed(view))
            }
            Err(err) if err.is_recoverable() => {
                warn!(event = %event, error = %err, "navigation rejected");
                self.surface.show_notice(&Notice::for_error(&err));
                Ok(NavigationOutcome::Unchanged)
            }
            Err(err) => Err(err),
        }
    }

    fn render(&mut self, next: NavigationState, dataset: &Dataset) -> ChartResult<()> {
        let ViewCommand {
            view,
            config,
            series,
            info,
            back_visible,
        } = build_view_command(&next, dataset, &self.config)?;

        if let Some(previous) = self.chart.take() {
            self.surface.destroy_chart(previous);
        }
        self.series = None;

        let chart = self.surface.create_chart(&config)?;
        self.chart = Some(chart);
        self.surface.set_back_visible(back_visible);
        self.surface.set_info_text(&info);
        debug!(
            view = %view,
            bars = series.len(),
            sector = next.current_sector().unwrap_or(""),
            subsector = next.current_subsector().unwrap_or(""),
            "view rendered"
        );
        self.series = Some(series);
        self.state = next;
        Ok(())
    }
}
