//! # Roomweave Command Line Entry Point
//!
//! Loads a catalog and configuration, runs the generator until a map closes
//! or the attempt budget runs out, and prints the result.

use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use roomweave::{
    AsciiCanvas, Catalog, DungeonGenerator, GenerationConfig, Generator, LayoutGenerator,
    RandomOrder, RoomweaveError, RoomweaveResult,
};
use std::path::PathBuf;

/// Output format for a generated map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ASCII drawing of the map
    Text,
    /// Recorded layout as JSON
    Json,
}

/// Command line arguments for the Roomweave generator.
#[derive(Parser, Debug)]
#[command(name = "roomweave")]
#[command(about = "Backtracking dungeon map generator built from room templates")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rooms (start included) a finished map must reach
    #[arg(long)]
    max_size: Option<u32>,

    /// Recursive attempts allowed per run
    #[arg(long)]
    threshold: Option<u32>,

    /// Coordinate limit of the playable area
    #[arg(long)]
    bound: Option<i32>,

    /// Only close the map with the target when no other door is open
    #[arg(long)]
    strict: bool,

    /// JSON catalog file (defaults to the builtin catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON generation config file; command line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runs to try before giving up
    #[arg(short, long, default_value_t = 1)]
    attempts: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> RoomweaveResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    info!("Starting Roomweave v{}", roomweave::VERSION);

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let config = build_config(&args)?;
    info!(
        "Generating with seed {} (max_size {}, threshold {}, bound {})",
        config.seed, config.max_size, config.threshold, config.bound
    );

    match args.format {
        OutputFormat::Text => run_text(catalog, config, args.attempts),
        OutputFormat::Json => run_json(catalog, config, args.attempts),
    }
}

/// Merges the optional config file with command line overrides.
fn build_config(args: &Args) -> RoomweaveResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_size) = args.max_size {
        config.max_size = max_size;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(bound) = args.bound {
        config.bound = bound;
    }
    if args.strict {
        config.strict_target_closure = true;
    }

    config.validate()?;
    Ok(config)
}

/// Regenerates onto an ASCII canvas until a map closes.
fn run_text(catalog: Catalog, config: GenerationConfig, attempts: u32) -> RoomweaveResult<()> {
    let seed = config.seed;
    let mut generator = DungeonGenerator::new(catalog, config)?;
    let mut canvas = AsciiCanvas::new();
    let mut order = RandomOrder::new(StdRng::seed_from_u64(seed));

    for attempt in 1..=attempts {
        match generator.try_generate(&mut canvas, &mut order) {
            Ok(report) => {
                info!(
                    "Attempt {} placed {} rooms, {} doors left open",
                    attempt,
                    report.rooms_placed,
                    report.open_doors.len()
                );
                println!("{}", canvas.render());
                return Ok(());
            }
            Err(err) => warn!("Attempt {}/{} failed: {}", attempt, attempts, err),
        }
    }

    error!("No map closed after {} attempts", attempts);
    Err(exhausted(attempts))
}

/// Regenerates through the pure generator and prints the layout as JSON.
fn run_json(catalog: Catalog, config: GenerationConfig, attempts: u32) -> RoomweaveResult<()> {
    let generator = LayoutGenerator::new(catalog);
    let mut rng = StdRng::seed_from_u64(config.seed);

    for attempt in 1..=attempts {
        match generator.generate(&config, &mut rng) {
            Ok(layout) => {
                generator.validate(&layout, &config)?;
                println!("{}", layout.to_json()?);
                return Ok(());
            }
            Err(err) => warn!("Attempt {}/{} failed: {}", attempt, attempts, err),
        }
    }

    error!("No map closed after {} attempts", attempts);
    Err(exhausted(attempts))
}

fn exhausted(attempts: u32) -> RoomweaveError {
    RoomweaveError::InvalidState(format!("every one of {} attempts failed", attempts))
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> RoomweaveResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| RoomweaveError::InvalidState(err.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level = log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Warn);

        env_logger::Builder::new()
            .filter_level(level)
            .format_target(false)
            .try_init()
            .map_err(|err| RoomweaveError::InvalidState(err.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::parse_from([
            "roomweave",
            "--seed",
            "9",
            "--max-size",
            "4",
            "--bound",
            "3",
            "--strict",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.seed, 9);
        assert_eq!(config.max_size, 4);
        assert_eq!(config.bound, 3);
        assert_eq!(config.threshold, roomweave::config::DEFAULT_THRESHOLD);
        assert!(config.strict_target_closure);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.attempts, 1);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args::parse_from(["roomweave", "--max-size", "1"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_runaway_settings_are_rejected() {
        let args = Args::parse_from([
            "roomweave",
            "--bound",
            "200",
            "--threshold",
            "200000",
            "--max-size",
            "100000",
        ]);
        assert!(matches!(
            build_config(&args),
            Err(RoomweaveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_format_flag() {
        let args = Args::parse_from(["roomweave", "--format", "json", "--attempts", "3"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.attempts, 3);
    }
}
