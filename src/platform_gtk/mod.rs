//! GTK4 host for the drill-down chart: a `DrawingArea` for the bars, a back
//! `Button`, an info `Label` and a notice `Label`.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::prelude::*;
use tracing::warn;

use crate::api::{
    ChartConfig, ChartSurface, DatasetSource, InfoText, Notice, NoticeSeverity,
    SectorChartConfig, ViewController, build_bar_frame, nearest_bar_index,
};
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, CairoRenderer, RenderFrame};

type SharedFrame = Rc<RefCell<Option<(u64, RenderFrame)>>>;

/// Handle for a chart drawn by `GtkSurface`.
#[derive(Debug, PartialEq, Eq)]
pub struct GtkChart {
    id: u64,
}

/// `ChartSurface` backed by GTK widgets.
pub struct GtkSurface {
    area: gtk::DrawingArea,
    back_button: gtk::Button,
    info_label: gtk::Label,
    notice_label: gtk::Label,
    frame: SharedFrame,
    viewport: Viewport,
    next_chart_id: u64,
}

impl GtkSurface {
    fn new(viewport: Viewport, font_family: &str) -> ChartResult<Self> {
        let (width, height) = viewport.pixel_size()?;
        let area = gtk::DrawingArea::new();
        area.set_content_width(width);
        area.set_content_height(height);

        let frame: SharedFrame = Rc::new(RefCell::new(None));
        let renderer = RefCell::new(
            CairoRenderer::new(width, height)?
                .with_font_family(font_family),
        );
        let draw_frame = Rc::clone(&frame);
        area.set_draw_func(move |_area, context, _width, _height| {
            if let Some((_, frame)) = draw_frame.borrow().as_ref() {
                if let Err(err) = renderer.borrow_mut().render_on_cairo_context(context, frame) {
                    warn!(error = %err, "failed to draw sector chart");
                }
            }
        });

        let back_button = gtk::Button::with_label("Terug");
        back_button.set_visible(false);
        let info_label = gtk::Label::new(None);
        info_label.set_wrap(true);
        let notice_label = gtk::Label::new(None);
        notice_label.set_visible(false);

        Ok(Self {
            area,
            back_button,
            info_label,
            notice_label,
            frame,
            viewport,
            next_chart_id: 1,
        })
    }
}

impl ChartSurface for GtkSurface {
    type Chart = GtkChart;

    fn create_chart(&mut self, config: &ChartConfig) -> ChartResult<GtkChart> {
        let frame = build_bar_frame(config, self.viewport)?;
        let id = self.next_chart_id;
        self.next_chart_id += 1;
        *self.frame.borrow_mut() = Some((id, frame));
        self.notice_label.set_visible(false);
        self.area.queue_draw();
        Ok(GtkChart { id })
    }

    fn destroy_chart(&mut self, chart: GtkChart) {
        let mut frame = self.frame.borrow_mut();
        if frame.as_ref().is_some_and(|(id, _)| *id == chart.id) {
            *frame = None;
        }
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.back_button.set_visible(visible);
    }

    fn set_info_text(&mut self, info: &InfoText) {
        self.info_label.set_text(&info.to_plain_text());
    }

    fn show_notice(&mut self, notice: &Notice) {
        if notice.severity == NoticeSeverity::Blocking {
            self.area.set_sensitive(false);
            self.back_button.set_sensitive(false);
        }
        self.notice_label.set_text(&notice.message);
        self.notice_label.set_visible(true);
    }

    fn hit_test(&self, chart: &GtkChart, _x: f64, y: f64) -> Option<usize> {
        match self.frame.borrow().as_ref() {
            Some((id, frame)) if *id == chart.id => nearest_bar_index(frame, y),
            _ => None,
        }
    }
}

/// Ready-to-embed widget tree wired to a `ViewController`.
pub struct GtkSectorChart {
    root: gtk::Box,
    controller: Rc<RefCell<ViewController<GtkSurface>>>,
}

impl GtkSectorChart {
    pub fn new(config: SectorChartConfig) -> ChartResult<Self> {
        let surface = GtkSurface::new(config.viewport, &config.theme.font_family)?;

        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.append(&surface.back_button);
        root.append(&surface.info_label);
        root.append(&surface.notice_label);
        root.append(&surface.area);

        let area = surface.area.clone();
        let back_button = surface.back_button.clone();
        let controller = Rc::new(RefCell::new(ViewController::new(surface, config)?));

        let click = gtk::GestureClick::new();
        let click_controller = Rc::clone(&controller);
        click.connect_pressed(move |_gesture, _presses, x, y| {
            if let Err(err) = click_controller.borrow_mut().click_at(x, y) {
                warn!(error = %err, "bar click failed");
            }
        });
        area.add_controller(click);

        let back_controller = Rc::clone(&controller);
        back_button.connect_clicked(move |_| {
            if let Err(err) = back_controller.borrow_mut().back() {
                warn!(error = %err, "back navigation failed");
            }
        });

        Ok(Self { root, controller })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::Box {
        &self.root
    }

    /// Loads the dataset and shows the sector view.
    pub fn start(&self, source: &dyn DatasetSource) -> ChartResult<()> {
        self.controller.borrow_mut().start(source)
    }
}
