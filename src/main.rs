// Command-line entry point for the drawable transcoder.
// The lib.rs file exposes the same functionality as a library.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use svg_drawables::{
    BatchProcessor, BatchSummary, Density, ResvgRasterizer, TranscodeSettings, WorkerPool,
    collect_sources,
};

/// Rasterize SVG sources into Android drawable-<density> PNGs.
#[derive(Parser, Debug)]
#[command(name = "svg-drawables", version)]
#[command(about = "Rasterize SVG sources into Android drawable-<density> PNGs")]
#[command(long_about = "Rasterize SVG sources into one PNG per Android density bucket.
Outputs are written to <into>/drawable-<density>/<name>.png, scaled from the width given for mdpi.
Command-line values override those read from --config.")]
struct Args {
    /// JSON settings file
    #[arg(short, long, value_name = "FILE",
          help = "JSON settings file with densities, include, into, width and projectDir")]
    config: Option<PathBuf>,

    /// Output width at mdpi
    #[arg(short, long, value_name = "PX", help = "Output width in pixels at mdpi")]
    width: Option<u32>,

    /// Output root
    #[arg(long, value_name = "DIR", help = "Directory receiving the drawable-* folders")]
    into: Option<PathBuf>,

    /// Include patterns
    #[arg(short, long, value_name = "GLOB",
          help = "Source pattern relative to the project dir, e.g. 'icons/**/*.svg' (repeatable)")]
    include: Vec<String>,

    /// Density range
    #[arg(short, long, value_name = "RANGE",
          help = "Density range such as mdpi-xxhdpi (default: mdpi, hdpi and xhdpi)")]
    densities: Option<String>,

    /// Project directory
    #[arg(short, long, value_name = "DIR", help = "Directory include patterns are rooted at (default: .)")]
    project_dir: Option<PathBuf>,

    /// Parallel workers
    #[arg(short, long, default_value_t = 1, help = "Number of parallel workers (1 = sequential)")]
    jobs: usize,

    /// Print a JSON summary
    #[arg(long, help = "Print a JSON summary of written files to stdout")]
    json: bool,

    /// Print the density table
    #[arg(long, help = "Print the density table and exit")]
    list_densities: bool,

    /// Verbose logging
    #[arg(short, long, help = "Log every written file")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_densities {
        print_densities();
        return Ok(());
    }

    let settings = load_settings(&args)?;
    let summary = run(&settings, args.jobs)?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{json}");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr) // stdout is reserved for --json
        .compact()
        .init();
}

/// Reads the config file, if any, then applies command-line overrides.
fn load_settings(args: &Args) -> Result<TranscodeSettings> {
    let mut settings = match &args.config {
        Some(path) => TranscodeSettings::from_json_file(path)?,
        None => TranscodeSettings::new(),
    };

    if let Some(width) = args.width {
        settings = settings.width(width);
    }
    if let Some(into) = &args.into {
        settings = settings.into_dir(into);
    }
    if !args.include.is_empty() {
        settings.include = args.include.clone();
    }
    if let Some(expression) = &args.densities {
        settings = settings.densities(expression)?;
    }
    if let Some(project_dir) = &args.project_dir {
        settings = settings.project_dir(project_dir);
    }

    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

fn run(settings: &TranscodeSettings, jobs: usize) -> Result<BatchSummary> {
    let project_dir = settings.effective_project_dir();
    let rasterizer = ResvgRasterizer::new().with_resources_dir(project_dir);
    let processor = BatchProcessor::new(settings, rasterizer)?;

    let sources = collect_sources(project_dir, &settings.include)?;
    info!(
        "Found {} source files under {} for densities [{}]",
        sources.len(),
        project_dir.display(),
        processor
            .densities()
            .iter()
            .map(|d| d.qualifier())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let summary = if jobs > 1 {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .context("Failed to start worker runtime")?;
        let pool = WorkerPool::new(processor, Some(jobs));
        runtime.block_on(pool.process(sources))?
    } else {
        processor.process(sources)?
    };
    Ok(summary)
}

fn print_densities() {
    println!("{:<8} {:<20} {:>8}  directory", "density", "alias", "scale");
    for density in Density::ALL {
        println!(
            "{:<8} {:<20} {:>8.5}  {}",
            density.qualifier(),
            density.alias(),
            density.scale(),
            density.directory_name()
        );
    }
}
