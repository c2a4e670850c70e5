#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use sector_chart::ChartError;
use sector_chart::api::{
    ChartConfig, ChartTheme, FrameSurface, SECTOR_TITLE, SectorChartConfig, StaticDatasetSource,
    TOTAL_DATASET_LABEL, ViewController, build_bar_frame,
};
use sector_chart::core::{LabelKind, SignPalette, Viewport, build_bar_series};
use sector_chart::render::{CairoContextRenderer, CairoRenderer, Renderer};

fn sector_config() -> ChartConfig {
    let series = build_bar_series(
        [("A Landbouw", 5.0), ("C Industrie", -12.5), ("B Mijnbouw", 12.5)],
        LabelKind::Sector,
        &SignPalette::default(),
    );
    let theme = ChartTheme::default();
    ChartConfig::horizontal_bar(
        &series,
        TOTAL_DATASET_LABEL,
        SECTOR_TITLE,
        theme.sector_title_font_size,
        true,
        &theme,
    )
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_bar_and_label() {
    let viewport = Viewport::new(900, 500);
    let frame = build_bar_frame(&sector_config(), viewport).expect("frame");
    let mut renderer = CairoRenderer::new(900, 500).expect("renderer");

    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();

    assert_eq!(stats.bars_drawn, 3);
    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let viewport = Viewport::new(600, 320);
    let frame = build_bar_frame(&sector_config(), viewport).expect("frame");
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external context render");

    assert_eq!(renderer.last_stats().bars_drawn, 3);
}

#[test]
fn controller_can_drive_a_cairo_surface() {
    let document = r#"{
        "sector_totals": {"A Landbouw": 5.0},
        "sector_details": {"A Landbouw": [{"name": "Mestregeling", "amount": 5.0}]}
    }"#;
    let config = SectorChartConfig::default().with_viewport(Viewport::new(640, 400));
    let renderer = CairoRenderer::new(640, 400).expect("renderer");
    let surface = FrameSurface::new(renderer, config.viewport).expect("surface");
    let mut controller = ViewController::new(surface, config).expect("controller");
    controller
        .start(&StaticDatasetSource::new("inline", document))
        .expect("dataset loads");
    controller.click_bar(0).expect("open landbouw");

    let stats = controller.surface().renderer().last_stats();
    assert_eq!(stats.bars_drawn, 1);
    assert!(stats.texts_drawn >= 3);
}
