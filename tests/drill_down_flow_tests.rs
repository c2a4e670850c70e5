use sector_chart::api::{
    FileDatasetSource, FrameSurface, NavigationOutcome, NoticeSeverity, SECTOR_HINT,
    SUBSECTOR_HINT, SectorChartConfig, StaticDatasetSource, ViewController,
};
use sector_chart::core::Viewport;
use sector_chart::interaction::View;
use sector_chart::render::NullRenderer;
use sector_chart::ChartError;

const DATASET: &str = r#"{
    "sector_totals": {
        "A Landbouw": 5.0,
        "C Industrie": -12.5,
        "B Mijnbouw": 12.5,
        "D Energie": 3.0
    },
    "sector_details": {
        "A Landbouw": [{"name": "Mestregeling", "amount": 5.0}],
        "B Mijnbouw": [
            {"name": "Gaswinning Groningen", "amount": 10.0},
            {"name": "Zoutwinning", "amount": 2.5}
        ],
        "D Energie": []
    },
    "industrie_subsectors": {
        "subsector_totals": {"20 Chemie": -4.5, "10 Voeding": -8.0, "24 Metaal": 0.0},
        "subsector_details": {
            "10 Voeding": [
                {"name": "Vrijstelling energiebelasting voor voedingsmiddelenproducenten", "amount": -8.0}
            ],
            "20 Chemie": [{"name": "Subsidie procesefficiency", "amount": -4.5}]
        }
    }
}"#;

// Sorted sector bars: Mijnbouw, Industrie, Landbouw, Energie.
const MIJNBOUW: usize = 0;
const INDUSTRIE: usize = 1;
const LANDBOUW: usize = 2;
const ENERGIE: usize = 3;

type HeadlessController = ViewController<FrameSurface<NullRenderer>>;

fn controller_with(document: &str) -> HeadlessController {
    let config = SectorChartConfig::default();
    let surface =
        FrameSurface::new(NullRenderer::default(), config.viewport).expect("surface init");
    let mut controller = ViewController::new(surface, config).expect("controller init");
    controller
        .start(&StaticDatasetSource::new("sector_data.json", document))
        .expect("dataset loads");
    controller
}

fn controller() -> HeadlessController {
    controller_with(DATASET)
}

fn labels(controller: &HeadlessController) -> Vec<String> {
    controller
        .current_series()
        .expect("series on screen")
        .labels()
}

#[test]
fn start_shows_sorted_sector_view_without_back_button() {
    let controller = controller();

    assert_eq!(controller.view(), View::Sectors);
    assert_eq!(
        labels(&controller),
        vec!["Mijnbouw", "Industrie", "Landbouw", "Energie"]
    );
    let surface = controller.surface();
    assert!(!surface.back_visible());
    assert_eq!(surface.live_chart_count(), 1);
    assert_eq!(surface.charts_created(), 1);
    assert_eq!(surface.renderer().frames_rendered, 1);
    assert_eq!(surface.renderer().last_bar_count, 4);
    let info = surface.info().expect("info text");
    assert_eq!(info.heading, None);
    assert_eq!(info.lines, vec![SECTOR_HINT.to_owned()]);
    assert!(surface.notices().is_empty());
}

#[test]
fn clicking_industrie_opens_subsector_view() {
    let mut controller = controller();

    let outcome = controller.click_bar(INDUSTRIE).expect("click");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Subsectors));
    assert_eq!(controller.state().current_sector(), Some("C Industrie"));
    assert_eq!(controller.state().current_subsector(), None);
    assert_eq!(labels(&controller), vec!["Voeding", "Chemie", "Metaal"]);

    let surface = controller.surface();
    assert!(surface.back_visible());
    let info = surface.info().expect("info text");
    assert_eq!(info.heading.as_deref(), Some("Industrie - Subsectoren"));
    assert_eq!(
        info.lines,
        vec![
            "Totaal: €-12.5 miljoen verdeeld over 3 subsectoren".to_owned(),
            SUBSECTOR_HINT.to_owned(),
        ]
    );
}

#[test]
fn clicking_other_sector_opens_its_measures() {
    let mut controller = controller();

    let outcome = controller.click_bar(LANDBOUW).expect("click");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Measures));
    assert_eq!(controller.state().current_sector(), Some("A Landbouw"));
    assert_eq!(controller.state().current_subsector(), None);
    assert_eq!(labels(&controller), vec!["Mestregeling"]);

    let info = controller.surface().info().expect("info text");
    assert_eq!(info.heading.as_deref(), Some("Landbouw"));
    assert_eq!(
        info.lines,
        vec!["Totaal: €5.0 miljoen verdeeld over 1 maatregelen".to_owned()]
    );
}

#[test]
fn measure_bars_are_not_clickable() {
    let mut controller = controller();
    controller.click_bar(MIJNBOUW).expect("click");
    let created = controller.surface().charts_created();

    let outcome = controller.click_bar(0).expect("click on measure");
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(controller.view(), View::Measures);
    assert_eq!(controller.surface().charts_created(), created);
    assert!(controller.surface().notices().is_empty());
}

#[test]
fn back_from_subsector_measures_returns_to_subsectors() {
    let mut controller = controller();
    controller.click_bar(INDUSTRIE).expect("open industrie");

    let outcome = controller.click_bar(0).expect("open voeding");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Measures));
    assert_eq!(controller.state().current_subsector(), Some("10 Voeding"));
    assert_eq!(controller.state().current_sector(), Some("C Industrie"));

    let outcome = controller.back().expect("back");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Subsectors));
    assert_eq!(controller.state().current_subsector(), None);
    assert!(controller.surface().back_visible());

    let outcome = controller.back().expect("back");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Sectors));
    assert_eq!(controller.state().current_sector(), None);
    assert!(!controller.surface().back_visible());
}

#[test]
fn back_from_sector_measures_returns_to_sectors() {
    let mut controller = controller();
    controller.click_bar(LANDBOUW).expect("open landbouw");

    let outcome = controller.back().expect("back");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Sectors));
    assert_eq!(controller.state().current_sector(), None);
}

#[test]
fn empty_sector_selection_only_raises_a_notice() {
    let mut controller = controller();

    let outcome = controller.click_bar(ENERGIE).expect("click");
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(controller.view(), View::Sectors);
    assert_eq!(controller.state().current_sector(), None);

    let surface = controller.surface();
    assert_eq!(surface.charts_created(), 1);
    assert_eq!(surface.live_chart_count(), 1);
    let notice = surface.notices().last().expect("notice");
    assert_eq!(notice.severity, NoticeSeverity::Informational);
    assert_eq!(notice.message, "Geen maatregelen gevonden voor deze sector.");
}

#[test]
fn empty_subsector_selection_only_raises_a_notice() {
    let mut controller = controller();
    controller.click_bar(INDUSTRIE).expect("open industrie");

    let outcome = controller.click_bar(2).expect("click metaal");
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(controller.view(), View::Subsectors);
    let notice = controller.surface().notices().last().expect("notice");
    assert_eq!(
        notice.message,
        "Geen maatregelen gevonden voor deze subsector."
    );
}

#[test]
fn missing_subsector_data_keeps_sector_view() {
    let document = r#"{
        "sector_totals": {"C Industrie": -12.5, "A Landbouw": 5.0},
        "sector_details": {"C Industrie": [{"name": "Energiebelasting", "amount": -12.5}]}
    }"#;
    let mut controller = controller_with(document);

    let outcome = controller.click_bar(0).expect("click industrie");
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(controller.view(), View::Sectors);
    let notice = controller.surface().notices().last().expect("notice");
    assert_eq!(notice.severity, NoticeSeverity::Informational);
    assert_eq!(notice.message, "Geen subsector data gevonden voor industrie.");
}

#[test]
fn every_render_destroys_the_previous_chart_first() {
    let mut controller = controller();

    controller.click_bar(INDUSTRIE).expect("open industrie");
    controller.click_bar(1).expect("open chemie");
    controller.back().expect("back");
    controller.back().expect("back");
    controller.click_bar(MIJNBOUW).expect("open mijnbouw");

    let surface = controller.surface();
    assert_eq!(surface.charts_created(), 6);
    assert_eq!(surface.live_chart_count(), 1);
    assert_eq!(surface.renderer().frames_rendered, 6);
    assert_eq!(surface.renderer().last_bar_count, 2);
}

#[test]
fn click_outside_series_is_ignored() {
    let mut controller = controller();

    let outcome = controller.click_bar(42).expect("click");
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(controller.surface().charts_created(), 1);
    assert!(controller.surface().notices().is_empty());
}

#[test]
fn pointer_click_resolves_the_nearest_bar() {
    let mut controller = controller();
    let bar = controller.surface().frame().expect("frame").bars[LANDBOUW];
    let y = bar.y + bar.height / 2.0;

    let outcome = controller.click_at(bar.x, y).expect("click");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Measures));
    assert_eq!(controller.state().current_sector(), Some("A Landbouw"));
}

#[test]
fn long_measure_names_are_truncated_but_kept_for_hover() {
    let mut controller = controller();
    controller.click_bar(INDUSTRIE).expect("open industrie");
    controller.click_bar(0).expect("open voeding");

    let series = controller.current_series().expect("series");
    let entry = &series.entries[0];
    assert_eq!(entry.label.chars().count(), 40);
    assert!(entry.label.ends_with("..."));
    assert_eq!(
        entry.full_label,
        "Vrijstelling energiebelasting voor voedingsmiddelenproducenten"
    );
    assert_eq!(entry.color, "#4790b1");
}

#[test]
fn load_failure_is_blocking_and_navigation_has_no_dataset() {
    let config = SectorChartConfig::default();
    let surface =
        FrameSurface::new(NullRenderer::default(), config.viewport).expect("surface init");
    let mut controller = ViewController::new(surface, config).expect("controller init");

    let err = controller
        .start(&FileDatasetSource::new("/nonexistent/sector_data.json"))
        .expect_err("missing file");
    assert!(matches!(err, ChartError::DatasetLoad { .. }));
    assert!(controller.dataset().is_none());

    let surface = controller.surface();
    assert_eq!(surface.charts_created(), 0);
    let notice = surface.notices().last().expect("notice");
    assert_eq!(notice.severity, NoticeSeverity::Blocking);
    assert_eq!(
        notice.message,
        "Error loading data. Please ensure /nonexistent/sector_data.json is in the same directory."
    );

    assert_eq!(
        controller.click_bar(0).expect("click"),
        NavigationOutcome::Unchanged
    );
    let err = controller.back().expect_err("no dataset");
    assert!(matches!(err, ChartError::DatasetNotLoaded));
}

#[test]
fn malformed_document_is_a_load_failure() {
    let config = SectorChartConfig::default();
    let surface =
        FrameSurface::new(NullRenderer::default(), config.viewport).expect("surface init");
    let mut controller = ViewController::new(surface, config).expect("controller init");

    let err = controller
        .start(&StaticDatasetSource::new(
            "sector_data.json",
            r#"{"sector_totals": {}}"#,
        ))
        .expect_err("sector_details missing");
    assert!(matches!(err, ChartError::DatasetLoad { .. }));
    assert_eq!(
        controller.surface().notices()[0].severity,
        NoticeSeverity::Blocking
    );
}

#[test]
fn custom_industrie_key_drives_the_subsector_branch() {
    let document = r#"{
        "sector_totals": {"X Maakindustrie": -4.5},
        "sector_details": {},
        "industrie_subsectors": {
            "subsector_totals": {"20 Chemie": -4.5},
            "subsector_details": {"20 Chemie": [{"name": "Subsidie", "amount": -4.5}]}
        }
    }"#;
    let config = SectorChartConfig::default()
        .with_industrie_sector_key("X Maakindustrie")
        .with_viewport(Viewport::new(640, 480));
    let surface =
        FrameSurface::new(NullRenderer::default(), config.viewport).expect("surface init");
    let mut controller = ViewController::new(surface, config).expect("controller init");
    controller
        .start(&StaticDatasetSource::new("inline", document))
        .expect("dataset loads");

    let outcome = controller.click_bar(0).expect("click");
    assert_eq!(outcome, NavigationOutcome::Changed(View::Subsectors));
    let info = controller.surface().info().expect("info");
    assert_eq!(info.heading.as_deref(), Some("Maakindustrie - Subsectoren"));
}

#[test]
fn extreme_totals_render_finite_geometry() {
    let controller = controller_with(
        r#"{
            "sector_totals": {"A Landbouw": 1.0e308, "B Mijnbouw": -1.0e308},
            "sector_details": {}
        }"#,
    );

    assert_eq!(controller.surface().renderer().last_bar_count, 2);
    let frame = controller.surface().frame().expect("frame on screen");
    assert_eq!(frame.bars.len(), 2);
    for bar in &frame.bars {
        assert!(bar.x.is_finite() && bar.width.is_finite() && bar.width > 0.0);
        assert!(bar.y.is_finite() && bar.height.is_finite());
    }
    for line in &frame.lines {
        assert!(line.x1.is_finite() && line.x2.is_finite());
    }
}

#[test]
fn controller_rejects_viewport_too_small_for_a_plot() {
    let config = SectorChartConfig::default().with_viewport(Viewport::new(200, 80));
    let surface = FrameSurface::new(NullRenderer::default(), Viewport::new(200, 80))
        .expect("surface accepts any non-zero size");
    let err = ViewController::new(surface, config).expect_err("no plot room");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 200,
            height: 80
        }
    ));
}
