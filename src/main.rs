use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use miette::{miette, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use resweep::report::write_matrices;
use resweep::{Analyzer, Config, ReportFormat, Reporter};

/// resweep - find declared-but-unused Android resources
#[derive(Parser, Debug)]
#[command(name = "resweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Android project root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for the json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for per-type configuration matrices. Without this flag,
    /// matrices are written to resource-matrices/ under the project root,
    /// and only if that directory already exists
    #[arg(long, value_name = "DIR")]
    matrix_dir: Option<PathBuf>,

    /// Additional library project root (can be specified multiple times)
    #[arg(short, long)]
    library: Vec<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("resweep v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_scan(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if cli.matrix_dir.is_some() {
        config.matrix_dir = cli.matrix_dir.clone();
    }
    if !cli.library.is_empty() {
        config.libraries.extend(cli.library.clone());
    }

    Ok(config)
}

fn run_scan(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let terminal = matches!(cli.format, OutputFormat::Terminal);
    if terminal && !cli.quiet {
        println!("Running in: {}", cli.path.display());
    }

    let spinner = (terminal && !cli.quiet).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("scanning project...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    });

    let analyzer = Analyzer::new(config.clone());
    let outcome = analyzer.analyze(&cli.path);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = outcome.map_err(|err| miette!("{err}"))?;

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&report)?;

    // An explicitly configured matrix directory is always written; the
    // default location is only written when it already exists.
    match &config.matrix_dir {
        Some(dir) => {
            let dir = if dir.is_absolute() {
                dir.clone()
            } else {
                cli.path.join(dir)
            };
            write_matrices(&dir, &report.matrices)?;
            if terminal && !cli.quiet {
                println!("{}", format!("Matrices written to {}", dir.display()).dimmed());
            }
        }
        None => {
            let default_dir = cli.path.join("resource-matrices");
            if default_dir.is_dir() {
                write_matrices(&default_dir, &report.matrices)?;
                if terminal && !cli.quiet {
                    println!(
                        "{}",
                        format!("Matrices written to {}", default_dir.display()).dimmed()
                    );
                }
            } else if terminal && !cli.quiet {
                println!(
                    "{}",
                    "Not writing configuration matrices; create a resource-matrices/ directory or pass --matrix-dir to get them."
                        .dimmed()
                );
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!("Scan completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
