use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pilot_core::time::{format_local, parse_local_to_utc, parse_tz};
use pilot_core::{
    back_calculate, priority_score, rank_tasks, reorder_tasks_by_mood, suggest_task,
    validate_tasks, Mood, Task,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod directions;
mod state;
mod travel;

#[derive(Parser, Debug)]
#[command(
    name = "pilot",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PILOT_BUILD_SHA"), ")"),
    about = "life-pilot: mood-aware task ranking and travel-aware scheduling"
)]
struct Cli {
    /// Debug logging (otherwise RUST_LOG applies)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank open tasks for how you feel right now
    Rank {
        /// Task export (defaults to ~/.lifepilot/tasks.json)
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Mood 1-5
        #[arg(long)]
        mood: Mood,

        /// Low mood: keep hard tasks at the end instead of dropping them
        #[arg(long)]
        unfiltered: bool,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Highlight a single task for your mood
    Suggest {
        #[arg(long)]
        tasks: Option<PathBuf>,

        #[arg(long)]
        mood: Mood,
    },

    /// Work back from an event start to wake-up time
    Schedule {
        /// Local start time "YYYY-MM-DD HH:MM" in the profile timezone
        #[arg(long)]
        start: String,

        #[arg(long, conflicts_with = "travel_seconds")]
        travel_minutes: Option<i64>,

        #[arg(long)]
        travel_seconds: Option<i64>,
    },

    /// Recompute travel time + schedule for upcoming events with a location
    SyncTravel {
        /// Event export (defaults to ~/.lifepilot/events.json)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Origin address (defaults to [profile].home_address)
        #[arg(long)]
        origin: Option<String>,

        /// Print the result without writing the file back
        #[arg(long)]
        dry_run: bool,
    },

    /// Show reminders that would be pushed for synced events
    Reminders {
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Manage ~/.lifepilot/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config (secrets masked)
    Show,
    /// Store the directions API key
    SetKey {
        key: String,
    },
    /// Remove the stored directions API key
    UnsetKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Rank {
            tasks,
            mood,
            unfiltered,
            limit,
        } => {
            let tasks = load_tasks(tasks)?;
            let ranked = if unfiltered {
                reorder_tasks_by_mood(&tasks, mood)
            } else {
                rank_tasks(&tasks, mood)
            };
            print_ranked(&ranked, mood, limit);
        }

        Command::Suggest { tasks, mood } => {
            let tasks = load_tasks(tasks)?;
            match suggest_task(&tasks, mood) {
                Some(t) => println!("Try this (mood {mood}): {}", describe_task(t)),
                None => println!("Nothing fits mood {mood} right now. Take a break."),
            }
        }

        Command::Schedule {
            start,
            travel_minutes,
            travel_seconds,
        } => {
            let cfg = config::load_config()?;
            let tz = parse_tz(&cfg.profile.timezone)?;
            let start_utc = parse_local_to_utc(&start, &cfg.profile.timezone)?;
            let travel = match (travel_seconds, travel_minutes) {
                (Some(s), _) => s,
                (None, Some(m)) => m
                    .checked_mul(60)
                    .with_context(|| format!("--travel-minutes {m} is out of range"))?,
                (None, None) => bail!("pass --travel-minutes or --travel-seconds"),
            };

            let chain = back_calculate(start_utc, travel, &cfg.routine)?;
            println!("Event starts {}\n", format_local(start_utc, tz));
            for (milestone, at) in chain.milestones() {
                println!("{:<14} {}", milestone.label(), format_local(at, tz));
            }
        }

        Command::SyncTravel {
            events,
            origin,
            dry_run,
        } => {
            let cfg = config::load_config()?;
            let path = events.map_or_else(state::default_events_path, Ok)?;
            travel::sync_travel(&cfg, &path, origin, dry_run)?;
        }

        Command::Reminders { events } => {
            let cfg = config::load_config()?;
            let path = events.map_or_else(state::default_events_path, Ok)?;
            travel::print_reminders(&cfg, &path)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!(
                    "{}",
                    toml::to_string_pretty(&cfg.redacted()).context("serialize config")?
                );
            }
            ConfigCommand::SetKey { key } => {
                let masked = config::set_directions_key(&key)?;
                println!("Stored directions API key {masked}");
            }
            ConfigCommand::UnsetKey => {
                if config::unset_directions_key()? {
                    println!("Removed directions API key");
                } else {
                    println!("No directions API key stored");
                }
            }
        },
    }

    Ok(())
}

fn load_tasks(path: Option<PathBuf>) -> Result<Vec<Task>> {
    let path = path.map_or_else(state::default_tasks_path, Ok)?;
    if !path.exists() {
        bail!("Tasks not found: {} (pass --tasks <file>)", path.display());
    }
    let tasks: Vec<Task> = state::read_json(&path)?;
    validate_tasks(&tasks).with_context(|| format!("validating {}", path.display()))?;
    tracing::debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
    Ok(tasks)
}

fn describe_task(t: &Task) -> String {
    let estimate = t
        .estimated_time
        .map(|m| format!(" ~{m}min"))
        .unwrap_or_default();
    format!(
        "{} [{:?}, difficulty {}]{}",
        t.title, t.priority, t.difficulty, estimate
    )
}

fn print_ranked(ranked: &[Task], mood: Mood, limit: usize) {
    println!("# Tasks for mood {mood} ({:?})\n", mood.band());
    if ranked.is_empty() {
        println!("(nothing to suggest)");
        return;
    }
    for (i, t) in ranked.iter().take(limit).enumerate() {
        println!("{:>2}. {} score={}", i + 1, describe_task(t), priority_score(t));
    }
    if ranked.len() > limit {
        println!("\n... {} more", ranked.len() - limit);
    }
}
