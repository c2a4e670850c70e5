use std::fs;
use std::path::{Path, PathBuf};

use sector_chart::api::{
    FileDatasetSource, FrameSurface, NavigationOutcome, SectorChartConfig,
    ViewJsonContractV1, ViewController, build_view_command,
};
use sector_chart::core::{DatasetBuilder, LedgerRow};
use sector_chart::render::NullRenderer;
use serde::Deserialize;

const USAGE: &str = "usage: sector_chart_dump view --data <path> [--config <path>] [--select <key>]... [--back]... --output <path>\n       sector_chart_dump build-dataset --input <ledger.json> --output <path>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    View,
    BuildDataset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Select(String),
    Back,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    steps: Vec<Step>,
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct LedgerFile {
    sector_columns: Vec<String>,
    #[serde(default)]
    excluded_columns: Vec<String>,
    sector_rows: Vec<LedgerRow>,
    #[serde(default)]
    subsector_columns: Vec<String>,
    #[serde(default)]
    subsector_rows: Option<Vec<LedgerRow>>,
}

fn main() {
    let _ = sector_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    match args.command {
        CommandKind::View => dump_view(&args),
        CommandKind::BuildDataset => build_dataset(&args),
    }
}

fn dump_view(args: &CliArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => SectorChartConfig::from_json_str(&read(path)?).map_err(|e| e.to_string())?,
        None => SectorChartConfig::default(),
    };
    let data_path = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data_path));

    let surface = FrameSurface::new(NullRenderer::default(), config.viewport)
        .map_err(|e| e.to_string())?;
    let mut controller = ViewController::new(surface, config).map_err(|e| e.to_string())?;
    controller
        .start(&FileDatasetSource::new(data_path))
        .map_err(|e| e.to_string())?;

    for step in &args.steps {
        let outcome = match step {
            Step::Select(key) => {
                let index = controller
                    .current_series()
                    .and_then(|series| series.original_keys().iter().position(|k| k == key))
                    .ok_or_else(|| format!("`{key}` is not a bar in the current view"))?;
                controller.click_bar(index)
            }
            Step::Back => controller.back(),
        }
        .map_err(|e| e.to_string())?;

        if outcome == NavigationOutcome::Unchanged {
            let notice = controller
                .surface()
                .notices()
                .last()
                .map_or_else(|| "navigation ignored".to_owned(), |n| n.message.clone());
            return Err(format!("step {step:?} did not change the view: {notice}"));
        }
    }

    let dataset = controller
        .dataset()
        .ok_or_else(|| "dataset not loaded".to_owned())?;
    let command = build_view_command(controller.state(), dataset, controller.config())
        .map_err(|e| e.to_string())?;
    let contract = ViewJsonContractV1::new(controller.state(), &command);
    let payload = contract.to_json_pretty().map_err(|e| e.to_string())?;
    write(&args.output, &payload)
}

fn build_dataset(args: &CliArgs) -> Result<(), String> {
    let input = args
        .input
        .as_ref()
        .ok_or_else(|| "missing --input".to_owned())?;
    let ledger: LedgerFile =
        serde_json::from_str(&read(input)?).map_err(|err| format!("invalid json: {err}"))?;

    let mut builder = DatasetBuilder::new().with_sector_ledger(
        &ledger.sector_rows,
        &ledger.sector_columns,
        &ledger.excluded_columns,
    );
    if let Some(rows) = &ledger.subsector_rows {
        builder = builder.with_subsector_ledger(rows, &ledger.subsector_columns);
    }
    let dataset = builder.build();
    eprintln!(
        "found {} sectors with data: {:?}",
        dataset.sector_totals.len(),
        dataset.sector_totals.keys().collect::<Vec<_>>()
    );
    let payload = dataset.to_json_pretty().map_err(|e| e.to_string())?;
    write(&args.output, &payload)
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn write(path: &Path, payload: &str) -> Result<(), String> {
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("view") => CommandKind::View,
        Some("build-dataset") => CommandKind::BuildDataset,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut steps = Vec::new();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--data" | "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for {flag}"))?;
                input = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--select" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --select".to_owned())?;
                steps.push(Step::Select(value));
            }
            "--back" => steps.push(Step::Back),
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let output = output.ok_or_else(|| "missing --output".to_owned())?;
    Ok(CliArgs {
        command,
        input,
        config,
        steps,
        output,
    })
}
