mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use haven::config::HavenConfig;
use haven::service::Haven;

#[derive(Parser)]
#[command(name = "haven", version, about = "Local journal for food, mood, sleep and more")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the database and apply bundled reference data
    Seed,
    /// List enabled entry types
    Types {
        /// Enable an entry type by name
        #[arg(long)]
        enable: Option<String>,
        /// Disable an entry type by name
        #[arg(long)]
        disable: Option<String>,
    },
    /// List labels for an entry type
    Labels {
        entry_type: String,
        /// Case-insensitive name filter
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Log an entry
    Log {
        entry_type: String,
        /// Label name (repeatable)
        #[arg(long = "label", short)]
        labels: Vec<String>,
        /// Option from the single-choice group (e.g. "Home Cooked")
        #[arg(long)]
        single: Option<String>,
        /// Numeric value (hours, ounces)
        #[arg(long, short)]
        value: Option<f64>,
        #[arg(long, short)]
        notes: Option<String>,
        /// RFC 3339 timestamp with offset, e.g. 2026-02-14T08:00:00-05:00; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Suggest labels for the current (or given) hour
    Suggest {
        entry_type: String,
        #[arg(long)]
        hour: Option<u32>,
    },
    /// Label counts for an hour window; start >= end wraps past midnight
    Frequency {
        entry_type: String,
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the day-grouped feed
    Trace {
        /// Only show one entry type
        #[arg(long = "type", short = 't')]
        entry_type: Option<String>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Numeric total for a day
    Total {
        entry_type: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show journal statistics
    Stats,
    /// Run database health checks
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = HavenConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Seed => cli::seed::seed(&config)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
        command => {
            let haven = Haven::open(config)?;
            run(&haven, command).await?;
        }
    }

    Ok(())
}

async fn run(haven: &Haven, command: Command) -> Result<()> {
    match command {
        Command::Types { enable, disable } => {
            cli::types::types(haven, enable.as_deref(), disable.as_deref()).await
        }
        Command::Labels { entry_type, search } => {
            cli::labels::labels(haven, &entry_type, search.as_deref()).await
        }
        Command::Log { entry_type, labels, single, value, notes, at } => {
            cli::log::log(
                haven,
                cli::log::LogArgs {
                    type_name: &entry_type,
                    labels: &labels,
                    single: single.as_deref(),
                    value,
                    notes,
                    at,
                },
            )
            .await
        }
        Command::Suggest { entry_type, hour } => cli::suggest::suggest(haven, &entry_type, hour).await,
        Command::Frequency { entry_type, start, end, limit } => {
            cli::frequency::frequency(haven, &entry_type, start, end, limit).await
        }
        Command::Trace { entry_type, pages } => cli::trace::trace(haven, entry_type.as_deref(), pages).await,
        Command::Total { entry_type, date } => cli::total::total(haven, &entry_type, date.as_deref()).await,
        Command::Seed | Command::Stats | Command::Doctor => Ok(()),
    }
}
