use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use pilot_core::time::{format_local, parse_tz};
use pilot_core::{
    project_event_reminders, recompute_schedules, BatchReport, Event, RoutineDurations,
    TravelEstimator,
};
use std::path::Path;

use crate::config::Config;
use crate::directions::DirectionsClient;
use crate::state;

/// `--origin` wins over `[profile].home_address`.
pub fn resolve_origin(cli_origin: Option<String>, cfg: &Config) -> Result<String> {
    cli_origin
        .or_else(|| cfg.profile.home_address.clone())
        .filter(|o| !o.trim().is_empty())
        .context("no origin; pass --origin or set [profile].home_address")
}

#[derive(Debug)]
pub struct SyncOutcome {
    pub report: BatchReport,
    pub events: Vec<Event>,
    /// Whether the export on disk was rewritten.
    pub written: bool,
}

/// Recompute an event export in place. Nothing is written on a dry run or
/// when no event changed.
pub fn sync_events_file(
    path: &Path,
    origin: &str,
    estimator: &dyn TravelEstimator,
    routine: &RoutineDurations,
    now: DateTime<Utc>,
    dry_run: bool,
) -> Result<SyncOutcome> {
    if !path.exists() {
        bail!("Events not found: {} (pass --events <file>)", path.display());
    }
    let mut events: Vec<Event> = state::read_json(path)?;
    let report = recompute_schedules(&mut events, origin, estimator, routine, now)?;

    let written = !dry_run && report.updated > 0;
    if written {
        state::write_json(path, &events)?;
    }

    Ok(SyncOutcome {
        report,
        events,
        written,
    })
}

/// `pilot sync-travel`: batch-recompute through the directions API.
pub fn sync_travel(cfg: &Config, path: &Path, origin: Option<String>, dry_run: bool) -> Result<()> {
    let origin = resolve_origin(origin, cfg)?;
    let client = DirectionsClient::from_config(&cfg.directions)?;

    let outcome = sync_events_file(path, &origin, &client, &cfg.routine, Utc::now(), dry_run)?;
    let report = &outcome.report;

    println!(
        "Updated {} of {} events ({} skipped)",
        report.updated,
        report.attempted(),
        report.skipped
    );
    for f in &report.failures {
        println!("  ! {}: {}", f.event_id, f.reason);
    }

    if dry_run {
        println!("\n{}", serde_json::to_string_pretty(&outcome.events)?);
    } else if outcome.written {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

pub fn print_reminders(cfg: &Config, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Events not found: {} (pass --events <file>)", path.display());
    }
    let tz = parse_tz(&cfg.profile.timezone)?;
    let events: Vec<Event> = state::read_json(path)?;
    let now = Utc::now();

    let mut intents: Vec<_> = events
        .iter()
        .flat_map(|e| project_event_reminders(e, now))
        .collect();
    intents.sort_by_key(|r| r.send_at_utc);

    if intents.is_empty() {
        println!("No pending reminders. Run `pilot sync-travel` first?");
        return Ok(());
    }
    for r in &intents {
        println!("{}  {}", format_local(r.send_at_utc, tz), r.title);
    }
    Ok(())
}
