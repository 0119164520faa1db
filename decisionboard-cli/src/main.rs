//! DecisionBoard CLI — build the decision dashboard from store exports.
//!
//! Commands:
//! - `build`: read the feed exports, build all five charts, write artifacts
//! - `config`: print the default dashboard config as TOML

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use decisionboard_core::DashboardConfig;
use decisionboard_runner::store::parse_timestamp;
use decisionboard_runner::{
    export_build_with_report, load_config, run_dashboard, CsvExportSource, DashboardRun,
};

#[derive(Parser)]
#[command(
    name = "decisionboard",
    about = "DecisionBoard CLI — trading decision monitoring dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard from CSV exports of the store queries.
    Build {
        /// Directory holding decisions.csv, rentability.csv and process_log.csv.
        #[arg(long)]
        source_dir: PathBuf,

        /// Path to a TOML config file. Defaults to built-in settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for chart specs and build artifacts.
        #[arg(long, default_value = "dashboard")]
        output_dir: PathBuf,

        /// Evaluation instant (YYYY-MM-DD HH:MM:SS). Defaults to local now.
        #[arg(long)]
        now: Option<String>,

        /// Export files start with a header line.
        #[arg(long, default_value_t = false)]
        headers: bool,

        /// Also write a Markdown report.
        #[arg(long, default_value_t = false)]
        report: bool,
    },
    /// Print the default config as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decisionboard=info,warn".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source_dir,
            config,
            output_dir,
            now,
            headers,
            report,
        } => run_build_cmd(source_dir, config, output_dir, now, headers, report),
        Commands::Config => {
            print!("{}", DashboardConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn run_build_cmd(
    source_dir: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: PathBuf,
    now: Option<String>,
    headers: bool,
    report: bool,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    // The clock is read once; every window in this build uses the same instant.
    let now = match now.as_deref() {
        Some(raw) => parse_now(raw)?,
        None => chrono::Local::now().naive_local(),
    };

    let source = CsvExportSource::new(&source_dir).with_headers(headers);
    let run = match run_dashboard(&source, &config, now) {
        Ok(run) => run,
        Err(err) if err.is_empty_feed() => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    print_summary(&run);

    let paths = export_build_with_report(&output_dir, &run, report)?;
    info!(dir = %paths.build_dir.display(), "artifacts written");
    println!("Artifacts saved to: {}", paths.build_dir.display());
    if let Some(report_path) = &paths.report_markdown {
        println!("Report: {}", report_path.display());
    }

    Ok(())
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    parse_timestamp(raw)
        .with_context(|| format!("invalid --now '{raw}', expected YYYY-MM-DD HH:MM:SS"))
}

fn print_summary(run: &DashboardRun) {
    let meta = &run.metadata;
    println!("=== Dashboard Build ===");
    println!("Built at:        {}", meta.built_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Source:          {}", meta.source);
    println!(
        "Decisions:       {} ({} in {}h window)",
        meta.counts.decisions, meta.counts.windowed, run.config.window_hours
    );
    println!("Rentability:     {} days", meta.counts.rentability_days);
    println!("Processes:       {}", meta.counts.processes);
    for warning in run.warnings() {
        println!("Warning:         {warning}");
    }
    for (i, column) in run.dashboard.columns().iter().enumerate() {
        let titles: Vec<&str> = column
            .iter()
            .map(|slot| run.dashboard.chart(*slot).title())
            .collect();
        println!("Column {}:        {}", i + 1, titles.join(" | "));
    }
}
