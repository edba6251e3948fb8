//! `booking` CLI — check event types and schedules, format display values.
//!
//! ## Usage
//!
//! ```sh
//! # Validate an event type (stdin → stdout)
//! echo '{"name":"Intro call","durationInMinutes":90}' | booking check-event
//!
//! # Validate a schedule from a file
//! booking check-schedule -i schedule.json
//!
//! # Format a duration
//! booking duration 90
//!
//! # Current UTC offset of a zone
//! booking tz-offset Europe/Berlin
//!
//! # List zones for a picker, filtered by substring
//! booking timezones --filter America/
//!
//! # JSON logs, verbose
//! RUST_LOG=debug booking --log-format json check-event -i event.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::{
    format_duration, format_timezone_offset, timezone_options, validate_event_type,
    validate_schedule, RawEventType, RawSchedule, Schedule, Violations,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Check event types and availability schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log output format (level is taken from RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an event type JSON document
    CheckEvent {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Validate a schedule JSON document
    CheckSchedule {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Format a duration in minutes, e.g. "1 hr 30 mins"
    Duration {
        minutes: u32,
    },
    /// Print the current UTC offset of an IANA timezone
    TzOffset {
        timezone: String,
    },
    /// List IANA timezones with their current offsets
    Timezones {
        /// Only show zones whose name contains this substring
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Commands::CheckEvent { input } => {
            let json = read_input(input.as_deref())?;
            let raw: RawEventType =
                serde_json::from_str(&json).context("Failed to parse event JSON")?;
            let event = validate_event_type(&raw).map_err(rejected)?;
            debug!(name = %event.name, minutes = event.duration.minutes(), "event accepted");

            let status = if event.is_active { "" } else { " [inactive]" };
            println!("{} ({}){}", event.name, event.duration_label(), status);
        }
        Commands::CheckSchedule { input } => {
            let json = read_input(input.as_deref())?;
            let raw: RawSchedule =
                serde_json::from_str(&json).context("Failed to parse schedule JSON")?;
            let schedule = validate_schedule(&raw).map_err(rejected)?;
            debug!(
                timezone = schedule.timezone().name(),
                intervals = schedule.availabilities().len(),
                "schedule accepted"
            );
            print!("{}", render_schedule(&schedule));
        }
        Commands::Duration { minutes } => {
            println!("{}", format_duration(minutes));
        }
        Commands::TzOffset { timezone } => {
            let label = format_timezone_offset(&timezone)
                .with_context(|| format!("Failed to format offset for '{}'", timezone))?;
            println!("{}", label);
        }
        Commands::Timezones { filter } => {
            let options = timezone_options(Utc::now());
            for option in options
                .iter()
                .filter(|o| filter.as_deref().is_none_or(|f| o.name.contains(f)))
            {
                println!("{} ({})", option.name, option.offset);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays pipeable.
fn init_logging(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {}", e);
    }
}

/// Turn a violation list into one error listing every problem, one per line.
fn rejected(violations: Violations) -> anyhow::Error {
    let lines: Vec<String> = violations.iter().map(|v| format!("  {}", v)).collect();
    anyhow::anyhow!(
        "{} validation error(s):\n{}",
        violations.len(),
        lines.join("\n")
    )
}

/// Timezone header, each day Monday first with its windows or "unavailable",
/// then the weekly total.
fn render_schedule(schedule: &Schedule) -> String {
    let mut out = format!(
        "Timezone: {} ({})\n",
        schedule.timezone().name(),
        booking_engine::format::offset_label(schedule.timezone(), Utc::now())
    );
    for (day, intervals) in schedule.by_day() {
        let windows = if intervals.is_empty() {
            "unavailable".to_string()
        } else {
            intervals
                .iter()
                .map(|a| format!("{}-{}", a.start, a.end))
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("{:<10} {}\n", day.as_str(), windows));
    }
    let weekly = match schedule.weekly_minutes() {
        0 => "none".to_string(),
        minutes => format_duration(minutes),
    };
    out.push_str(&format!("Weekly availability: {}\n", weekly));
    out
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
