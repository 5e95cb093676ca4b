mod text_sink;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vv_app::{
    AppError, AppResult, DashboardConfig, FileSource, LoadProgressEvent, PayloadSource,
    ReaderSource, ViewMode, load_config, load_readings, load_readings_with_progress,
    open_dashboard,
};
use vv_core::{CategoryFilter, category_options};
use vv_pivot::build_series;

use crate::text_sink::TextSink;

#[derive(Parser)]
#[command(name = "vv-cli")]
#[command(about = "VitalView CLI - Patient vital-signs grid and chart viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload and report how many readings it holds
    Validate {
        /// Payload file (XML envelope), or - for stdin
        payload: PathBuf,
        /// Dashboard config YAML
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the categories present in a payload
    Categories {
        /// Payload file (XML envelope), or - for stdin
        payload: PathBuf,
        /// Dashboard config YAML
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render the tabular grid view
    Grid(ViewArgs),
    /// Render the per-parameter chart view
    Series {
        #[command(flatten)]
        view: ViewArgs,
        /// Print hover details for every point
        #[arg(short, long)]
        verbose: bool,
    },
    /// Export one parameter's series as CSV
    ExportSeries {
        /// Payload file (XML envelope), or - for stdin
        payload: PathBuf,
        /// Parameter name (e.g., "Heart Rate")
        name: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Dashboard config YAML
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Payload file (XML envelope), or - for stdin
    payload: PathBuf,
    /// Category to show, or "all"
    #[arg(long)]
    category: Option<String>,
    /// Alert filter: all, alerts or normal
    #[arg(long)]
    alerts: Option<String>,
    /// Dashboard config YAML
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Validate { payload, config } => cmd_validate(&payload, config.as_deref()),
        Commands::Categories { payload, config } => cmd_categories(&payload, config.as_deref()),
        Commands::Grid(args) => cmd_view(&args, ViewMode::Grid, false),
        Commands::Series { view, verbose } => cmd_view(&view, ViewMode::Series, verbose),
        Commands::ExportSeries {
            payload,
            name,
            output,
            config,
        } => cmd_export_series(&payload, &name, output.as_deref(), config.as_deref()),
    }
}

fn error_message(err: &AppError) -> String {
    format!("Error: {err}")
}

fn payload_source(path: &Path) -> Box<dyn PayloadSource> {
    tracing::debug!(payload = %path.display(), "opening payload source");
    if path.as_os_str() == "-" {
        Box::new(ReaderSource::new(io::stdin(), "stdin"))
    } else {
        Box::new(FileSource::new(path))
    }
}

fn resolve_config(path: Option<&Path>) -> AppResult<DashboardConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(DashboardConfig::default()),
    }
}

fn cmd_validate(payload: &Path, config: Option<&Path>) -> AppResult<()> {
    let config = resolve_config(config)?;
    let mut source = payload_source(payload);

    let readings = load_readings_with_progress(
        source.as_mut(),
        &config,
        Some(&mut |event: LoadProgressEvent| {
            eprintln!(
                "  {:<9} {:.3}s{}",
                event.stage.label(),
                event.elapsed_wall_s,
                event
                    .payload_bytes
                    .map(|b| format!("  {} bytes", b))
                    .unwrap_or_default()
            );
        }),
    )?;

    let with_values = readings.iter().filter(|r| r.has_value()).count();
    let alerts = readings.iter().filter(|r| r.is_alert()).count();
    println!("✓ Payload is valid");
    println!("  Readings: {}", readings.len());
    println!("  With values: {}", with_values);
    println!("  Alerts: {}", alerts);
    println!("  Categories: {}", category_options(&readings).len());
    Ok(())
}

fn cmd_categories(payload: &Path, config: Option<&Path>) -> AppResult<()> {
    let config = resolve_config(config)?;
    let mut source = payload_source(payload);
    let readings = load_readings(source.as_mut(), &config)?;

    let categories = category_options(&readings);
    if categories.is_empty() {
        println!("No categories found in payload");
    } else {
        println!("Categories:");
        for category in categories {
            println!("  {}", category);
        }
    }
    Ok(())
}

fn cmd_view(args: &ViewArgs, view: ViewMode, verbose: bool) -> AppResult<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    config.initial_view = view;
    if let Some(category) = &args.category {
        config.category = category.clone();
    }
    if let Some(alerts) = &args.alerts {
        config.alert_status = alerts.clone();
    }

    let mut sink = TextSink::new(io::stdout().lock());
    sink.verbose = verbose;

    let mut source = payload_source(&args.payload);
    let mut controller = open_dashboard(source.as_mut(), &config, sink)?;

    // Categories on the command line must exist in the data.
    if let CategoryFilter::Only(category) = &controller.selection().category
        && !controller.categories().contains(category)
    {
        return Err(AppError::InvalidInput(format!(
            "Unknown category '{}'. Available: {}",
            category,
            controller.categories().join(", ")
        )));
    }

    let summary = controller.render()?;
    eprintln!(
        "\n{} view: {} readings, {} {} ({})",
        summary.view,
        summary.readings,
        summary.items,
        match summary.view {
            ViewMode::Grid => "rows",
            ViewMode::Series => "series",
        },
        controller.selection().alert_status
    );
    Ok(())
}

fn cmd_export_series(
    payload: &Path,
    name: &str,
    output: Option<&Path>,
    config: Option<&Path>,
) -> AppResult<()> {
    let config = resolve_config(config)?;
    let mut source = payload_source(payload);
    let readings = load_readings(source.as_mut(), &config)?;

    let series = build_series(&readings);
    let selected = series.iter().find(|s| s.name == name).ok_or_else(|| {
        AppError::InvalidInput(format!("No plottable series named '{}'", name))
    })?;

    // Build CSV
    let mut csv = String::from("label,value\n");
    for point in &selected.points {
        csv.push_str(&format!("\"{}\",{}\n", point.label.replace('"', "\"\""), point.value));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            selected.points.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
        io::stdout().flush()?;
    }

    Ok(())
}
