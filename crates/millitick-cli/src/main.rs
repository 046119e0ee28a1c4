//! millitick command-line tool.
//!
//! Inspects unit conversions on the 32-bit millisecond timebase and runs a
//! cyclic tick loop that reports scheduling jitter.

mod config;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use millitick_clock::{Clock, Deadline, JitterRecorder, MonotonicClock, Stopwatch, Ticker};
use millitick_core::human;
use tracing::{debug, info, warn};

use crate::config::TickConfig;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "millitick",
    about = "32-bit millisecond timebase tools",
    version,
    long_about = None
)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert human-readable durations to 32-bit millisecond values.
    Convert {
        /// Durations to convert ("90s", "1.5h", "1h 30m").
        #[arg(required = true)]
        durations: Vec<String>,

        /// Print only the raw millisecond values.
        #[arg(long)]
        millis_only: bool,
    },

    /// Run a cyclic tick loop and report scheduling jitter.
    Tick {
        /// Path to a configuration file (TOML).
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Tick period (overrides config file).
        #[arg(long, short = 'p')]
        period: Option<String>,

        /// Number of ticks to run, 0 for unlimited (overrides config file).
        #[arg(long, short = 'n')]
        count: Option<u64>,

        /// Emit the final summary as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    match args.command {
        Command::Convert {
            durations,
            millis_only,
        } => run_convert(&durations, millis_only),
        Command::Tick {
            config,
            period,
            count,
            json,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(period) = period {
                config.period = human::parse(&period)
                    .with_context(|| format!("invalid --period value {period:?}"))?;
            }
            if let Some(count) = count {
                config.count = count;
            }
            run_tick(&config, json)
        }
    }
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!("millitick={level},millitick_clock={level},millitick_core={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing source wins):
/// 1. Command-line `--config` argument
/// 2. `MILLITICK_CONFIG_PATH` environment variable
/// 3. `millitick.toml` in the working directory
/// 4. Built-in defaults
fn load_config(path: Option<&Path>) -> Result<TickConfig> {
    if let Some(path) = path {
        info!(?path, "Loading config from command-line argument");
        return TickConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    if let Ok(env_path) = std::env::var("MILLITICK_CONFIG_PATH") {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            info!(?path, "Loading config from MILLITICK_CONFIG_PATH");
            return TickConfig::from_file(&path).with_context(|| {
                format!("Failed to load config from MILLITICK_CONFIG_PATH={env_path}")
            });
        }
        warn!(
            path = %env_path,
            "MILLITICK_CONFIG_PATH set but file does not exist, checking other locations"
        );
    }

    let local_path = Path::new("millitick.toml");
    if local_path.exists() {
        info!(?local_path, "Loading config from local path");
        return TickConfig::from_file(local_path)
            .with_context(|| format!("Failed to load config from {}", local_path.display()));
    }

    info!("No config file found, using built-in defaults");
    Ok(TickConfig::default())
}

/// Convert each input and print it.
fn run_convert(durations: &[String], millis_only: bool) -> Result<()> {
    for input in durations {
        let t = human::parse(input).with_context(|| format!("cannot convert {input:?}"))?;
        if millis_only {
            println!("{}", t.as_millis());
        } else {
            println!("{input} = {} ms ({t})", t.as_millis());
        }
    }
    Ok(())
}

/// Run the cyclic tick loop against the monotonic clock.
fn run_tick(config: &TickConfig, json: bool) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut ticker = Ticker::new(clock.now(), config.period, config.policy)
        .context("Failed to create ticker")?;
    let mut jitter = JitterRecorder::new(config.histogram_size, config.period);
    let mut stopwatch = Stopwatch::started_at(clock.now());

    info!(
        period = %config.period,
        count = config.count,
        policy = ?config.policy,
        "Starting tick loop"
    );

    let mut fired = 0u64;
    while config.count == 0 || fired < config.count {
        let now = clock.now();
        let due = ticker.poll(now);

        if due == 0 {
            let wait = Deadline::at(ticker.next_fire()).remaining(now);
            std::thread::sleep(Duration::from(wait));
            continue;
        }

        let elapsed = stopwatch.lap(now);
        jitter.record(elapsed);
        fired += u64::from(due);
        debug!(fired, due, elapsed = %elapsed, "tick");

        // Periodic status logging (every 1000 fires)
        if fired % 1_000 == 0 {
            info!(
                fired,
                late = jitter.late_count(),
                skipped = ticker.skipped(),
                "Periodic status"
            );
        }
    }

    let snapshot = jitter.snapshot();
    info!(
        total_ticks = snapshot.total_ticks,
        late = snapshot.late_count,
        skipped = ticker.skipped(),
        span_ms = snapshot.deviation_span_ms().unwrap_or(0),
        "Tick loop complete"
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize summary")?
        );
    }

    Ok(())
}
