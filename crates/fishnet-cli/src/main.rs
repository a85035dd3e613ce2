//! Command-line interface for `fishnet`, which samples river-barrier candidates
//! against a per-dataset quota and exports them with square footprints.
//!
//! This binary provides a thin CLI over the [`fishnet_core`] library.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! Library crates log through the `log` facade, which is bridged into `tracing` at startup.
//!
//! # Available Commands
//!
//! - `sample` - Draw a quota-based sample and write the table, points and fishnet files
//! - `cells` - Count candidates per dataset and category

mod display;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use fishnet_core::config::{DEFAULT_DELIMITER, SamplingConfig, delimiter_byte};
use fishnet_core::error::FishnetError;
use fishnet_core::operations;

#[derive(Parser)]
#[command(
    name = "fishnet",
    version,
    about = "Quota-based sampling of river barriers with fishnet footprints",
    long_about = "fishnet draws a stratified random sample of barrier points per dataset and\n\
                  category, optionally topping up an already reviewed selection, and exports\n\
                  it as a CSV table plus point and square-footprint GeoJSON files."
)]
/// Command-line arguments and options for the `fishnet` CLI.
///
/// This struct defines the top-level CLI interface, including global flags for
/// logging verbosity and the subcommand to execute.
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `fishnet` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Samples candidates against a quota and exports the selection.
    ///
    /// With `--accepted`, only the records the reviewed selection is still
    /// missing are drawn, excluding everything it already contains.
    Sample {
        /// Candidate table (CSV with TID, Type, Lat, Lon, Country, Dataset).
        #[arg(short, long, value_name = "CSV")]
        input: Option<PathBuf>,

        /// Configuration file holding the quota, e.g. {"quota": {"GROD": {"Dams": 200}}}.
        #[arg(short, long, value_name = "JSON")]
        quota: PathBuf,

        /// Output table; the `_points` and `_fishnet` files are written next to it.
        #[arg(short, long, value_name = "CSV")]
        output: Option<PathBuf>,

        /// Reviewed selection with a `check_results` column; enables gap-filling.
        #[arg(short, long, value_name = "CSV")]
        accepted: Option<PathBuf>,

        /// Random seed (defaults to 325, or 42 when gap-filling).
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Half the side length of each footprint, in metres.
        #[arg(long, value_name = "METRES")]
        half_size: Option<f64>,

        /// `check_results` value that marks a reviewed record as usable.
        #[arg(long, value_name = "STATUS")]
        valid_status: Option<String>,

        /// Field delimiter of the input and output tables (default: ',').
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,
    },

    /// Prints the number of candidates per dataset and category.
    ///
    /// Candidates north of the latitude limit are not counted.
    Cells {
        /// Candidate table.
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        /// Field delimiter of the candidate table.
        #[arg(long, value_name = "CHAR", default_value_t = char::from(DEFAULT_DELIMITER))]
        delimiter: char,
    },
}

/// Overrides given on the command line for the `sample` subcommand.
#[derive(Debug, Default)]
struct SampleOverrides {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    accepted: Option<PathBuf>,
    seed: Option<u64>,
    half_size: Option<f64>,
    valid_status: Option<String>,
    delimiter: Option<char>,
}

/// Entry point for the `fishnet` command-line interface.
///
/// # Errors
///
/// Returns an error if command execution fails or if the logging system cannot be initialized.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity flags
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true) // Show module paths for better context
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sample {
            input,
            quota,
            output,
            accepted,
            seed,
            half_size,
            valid_status,
            delimiter,
        } => {
            info!("Sampling with configuration {}", quota.display());
            let overrides = SampleOverrides {
                input,
                output,
                accepted,
                seed,
                half_size,
                valid_status,
                delimiter,
            };
            handle_sample(&quota, overrides)?;
        },
        Commands::Cells { input, delimiter } => {
            info!("Counting cells in {}", input.display());
            handle_cells(&input, delimiter)?;
        },
    }

    Ok(())
}

/// Load the configuration file and apply command-line overrides.
fn build_config(
    quota: &Path,
    overrides: SampleOverrides,
) -> fishnet_core::error::Result<SamplingConfig> {
    let mut config = SamplingConfig::from_json_file(quota)?;
    if let Some(input) = overrides.input {
        config = config.with_input(input);
    }
    if let Some(output) = overrides.output {
        config = config.with_output(output);
    }
    if let Some(accepted) = overrides.accepted {
        config = config.with_accepted(accepted);
    }
    if let Some(seed) = overrides.seed {
        config = config.with_seed(seed);
    }
    if let Some(half_size) = overrides.half_size {
        config = config.with_half_size(half_size);
    }
    if let Some(status) = overrides.valid_status {
        config = config.with_valid_status(status);
    }
    if let Some(delimiter) = overrides.delimiter {
        config = config.with_delimiter(delimiter);
    }
    debug!("Effective configuration: {config:?}");
    Ok(config)
}

fn handle_sample(quota: &Path, overrides: SampleOverrides) -> Result<()> {
    let report = build_config(quota, overrides)
        .and_then(|config| operations::run(&config))
        .map_err(report_error)?;

    display::display_run_report(&report);
    Ok(())
}

fn handle_cells(input: &Path, delimiter: char) -> Result<()> {
    let records = delimiter_byte(delimiter)
        .and_then(|delimiter| operations::load_candidates(input, delimiter))
        .map_err(report_error)?;
    display::display_cell_counts(&operations::cell_counts(&records));
    Ok(())
}

/// Print the recovery hint for a failed run and hand the error to `anyhow`.
fn report_error(err: FishnetError) -> anyhow::Error {
    if let Some(hint) = err.recovery_suggestion() {
        eprintln!("Hint: {hint}");
    }
    anyhow::Error::new(err)
}
