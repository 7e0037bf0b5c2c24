//! Fleet simulation CLI
//!
//! Runs one simulation and prints the per-type summary.
//!
//! Usage:
//!   fleet-sim --fleet-size 20 --chargers 3 --duration-min 180 --format csv

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evtol_fleet_sim::report::{self, ReportFormat};
use evtol_fleet_sim::sim_clock::MS_PER_MIN;
use evtol_fleet_sim::{FleetSimulator, SimConfig, StatisticsAggregator, TripPolicy};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "fleet-sim",
    about = "Simulate an electric aircraft fleet sharing a pool of chargers"
)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of aircraft
    #[arg(short = 'n', long)]
    fleet_size: Option<usize>,

    /// Ceiling on the number of aircraft
    #[arg(long)]
    max_fleet_size: Option<usize>,

    /// Number of chargers
    #[arg(short, long)]
    chargers: Option<usize>,

    /// Tick length in milliseconds
    #[arg(long)]
    step_ms: Option<u64>,

    /// Run length in minutes of simulated time
    #[arg(short, long)]
    duration_min: Option<u64>,

    /// Random seed for fleet composition, faults and trip planning
    #[arg(short, long)]
    seed: Option<u64>,

    /// Randomize trips, with lengths no shorter than this fraction of range
    #[arg(long)]
    min_range_fraction: Option<f64>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,

    /// Also report per-vehicle time in each mode
    #[arg(long)]
    modes: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output (per-tick vehicle state)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(n) = self.fleet_size {
            config.fleet_size = n;
        }
        if let Some(max) = self.max_fleet_size {
            config.max_fleet_size = max;
        }
        if let Some(c) = self.chargers {
            config.charger_count = c;
        }
        if let Some(step) = self.step_ms {
            config.step_ms = step;
        }
        if let Some(minutes) = self.duration_min {
            config.duration_ms = minutes * MS_PER_MIN;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(min_range_fraction) = self.min_range_fraction {
            config.trip_policy = TripPolicy::Randomized { min_range_fraction };
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.to_config()?;
    info!(
        fleet_size = config.fleet_size,
        chargers = config.charger_count,
        step_ms = config.step_ms,
        duration_ms = config.duration_ms,
        seed = config.seed,
        trips = %config.trip_policy.label(),
        "configuration"
    );

    let mut sim = FleetSimulator::with_random_fleet(config).context("invalid configuration")?;
    sim.run();

    let stats = StatisticsAggregator::new(&sim);
    let types = stats.type_stats();
    let modes = args.modes.then(|| stats.mode_shares());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            info!("Writing report to {:?}", path);
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ReportFormat::Csv => {
            report::write_type_stats_csv(&mut out, &types)?;
            if let Some(modes) = &modes {
                writeln!(out)?;
                report::write_mode_shares_csv(&mut out, modes)?;
            }
        }
        ReportFormat::Json => {
            report::write_json(&mut out, &stats.fleet_totals(), &types, modes.as_deref())?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}
