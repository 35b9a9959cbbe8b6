use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pinhue::export::{self, ExportFormat};
use pinhue::models::{AppConfig, BoardReport, CONFIG_ENV};
use pinhue::services::{
    BoardAnalyzer, BoardCollector, HtmlPageAccess, HttpImageFetcher, ImageSource, PageAccess,
    SchemeRouter, SyntheticImageSource, UnavailablePageAccess,
};

/// Board analyzed by `pinhue demo`; its page is never requested.
const DEMO_BOARD: &str = "https://www.pinterest.com/pinhue/earthy-demo/";

#[derive(Parser)]
#[command(name = "pinhue")]
#[command(about = "Dominant colors and trend insights for pin boards")]
struct Cli {
    /// YAML config file (defaults to $PINHUE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a board and print its palette
    Analyze {
        /// Board URL, e.g. https://www.pinterest.com/<user>/<board>/
        url: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Dominant colors extracted per image
        #[arg(long)]
        palette_size: Option<usize>,

        /// Colors closer than this (RGB distance) are merged
        #[arg(long)]
        merge_distance: Option<f32>,

        /// Colors in the reported palette
        #[arg(long)]
        limit: Option<usize>,

        /// Images processed concurrently
        #[arg(long)]
        workers: Option<usize>,

        /// Per-image fetch timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Byte ceiling per image
        #[arg(long)]
        max_bytes: Option<u64>,

        /// Do not request the board page; analyze the built-in fallback board
        #[arg(long)]
        offline: bool,
    },
    /// Analyze the built-in fallback board without network access
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Analyze {
            url,
            output,
            palette_size,
            merge_distance,
            limit,
            workers,
            timeout,
            max_bytes,
            offline,
        }) => {
            init_logging();
            let mut config = AppConfig::load(config_path.as_deref());
            if let Some(k) = palette_size {
                config.analysis.palette_size = k;
            }
            if let Some(d) = merge_distance {
                config.analysis.merge_distance = d;
            }
            if let Some(n) = limit {
                config.analysis.palette_limit = n;
            }
            if let Some(w) = workers {
                config.fetch.workers = w;
            }
            if let Some(t) = timeout {
                config.fetch.timeout_secs = t;
            }
            if let Some(b) = max_bytes {
                config.fetch.max_bytes = b;
            }
            config.validate()?;

            run_analyze(&config, &url, offline, &output).await
        }
        Some(Commands::Demo { output }) => {
            init_logging();
            let config = AppConfig::load(config_path.as_deref());
            run_analyze(&config, DEMO_BOARD, true, &output).await
        }
        Some(Commands::Config) => {
            init_logging();
            let config = AppConfig::load_strict(config_path.as_deref())
                .context("Failed to load configuration")?;
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Logging for CLI runs goes to stderr so stdout stays clean for exports.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinhue=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run_analyze(
    config: &AppConfig,
    url: &str,
    offline: bool,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let access: Arc<dyn PageAccess> = if offline {
        Arc::new(UnavailablePageAccess)
    } else {
        Arc::new(HtmlPageAccess::new(&config.fetch)?)
    };
    let images: Arc<dyn ImageSource> = Arc::new(SchemeRouter::new(
        Arc::new(SyntheticImageSource),
        Arc::new(HttpImageFetcher::new(&config.fetch)?),
    ));

    let collector = BoardCollector::new(access, config.collector.clone());
    let analyzer = BoardAnalyzer::new(config, collector, images);
    let report = analyzer.analyze(url).await?;

    write_report(&report, output)
}

fn write_report(report: &BoardReport, output: &OutputArgs) -> anyhow::Result<()> {
    let rendered = export::render(report, output.format)?;

    match &output.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} ({} colors, {} of {} images analyzed)",
                path.display(),
                report.result.colors.len(),
                report.analyzed(),
                report.outcomes.len()
            );
        }
        None => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Pinhue v{VERSION}");
    println!("Dominant colors and trend insights for pin boards\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        std::env::var(CONFIG_ENV).as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG     = {}",
        std::env::var("RUST_LOG").as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("  Source: {source}");

    let config = AppConfig::load(config_path);
    println!(
        "  Palette: {} colors per image, merge distance {}, top {}",
        config.analysis.palette_size, config.analysis.merge_distance, config.analysis.palette_limit
    );
    println!(
        "  Fetch:   {} workers, {}s timeout, {} byte ceiling",
        config.fetch.workers, config.fetch.timeout_secs, config.fetch.max_bytes
    );

    println!("\nCommands:");
    println!("  pinhue analyze <URL>  Analyze a board");
    println!("  pinhue demo           Analyze the built-in fallback board");
    println!("  pinhue config         Print the effective configuration");
    println!("  pinhue --help         Show all options");
}
