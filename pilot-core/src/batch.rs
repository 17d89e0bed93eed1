//! Batch travel + schedule recompute over a user's upcoming events.
//!
//! One event failing its routing lookup never aborts the batch.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;
use crate::event::Event;
use crate::routine::RoutineDurations;
use crate::schedule::back_calculate;

/// Source of travel-time estimates (directions API, fixtures, ...).
pub trait TravelEstimator {
    /// Transit time in seconds from `origin` to `destination`.
    fn estimate_seconds(&self, origin: &str, destination: &str) -> Result<i64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub event_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Events whose travel + schedule fields were rewritten.
    pub updated: usize,
    /// Past events or events without a location.
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.updated + self.failures.len()
    }
}

/// Recompute travel time and the schedule chain for every upcoming event
/// with a location. Safe to re-run; successful events are overwritten.
///
/// A negative routine is a configuration error and fails before any event
/// is touched.
pub fn recompute_schedules(
    events: &mut [Event],
    origin: &str,
    estimator: &dyn TravelEstimator,
    routine: &RoutineDurations,
    now: DateTime<Utc>,
) -> Result<BatchReport, ValidationError> {
    routine.validate()?;

    let mut report = BatchReport::default();

    for event in events.iter_mut() {
        if !event.is_upcoming(now) {
            report.skipped += 1;
            continue;
        }
        let Some(destination) = event.location().map(str::to_owned) else {
            report.skipped += 1;
            continue;
        };

        let outcome = estimator
            .estimate_seconds(origin, &destination)
            .and_then(|secs| {
                let chain = back_calculate(event.start_time, secs, routine)?;
                Ok((secs, chain))
            });

        match outcome {
            Ok((secs, chain)) => {
                tracing::debug!(event_id = %event.id, travel_seconds = secs, "schedule recomputed");
                event.travel_duration_seconds = Some(secs);
                event.schedule = Some(chain);
                report.updated += 1;
            }
            Err(err) => {
                tracing::warn!(event_id = %event.id, error = %err, "skipping event: travel estimate failed");
                report.failures.push(BatchFailure {
                    event_id: event.id.clone(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    tracing::info!(
        updated = report.updated,
        failed = report.failures.len(),
        skipped = report.skipped,
        "travel sync finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::{Duration, TimeZone};

    struct Fixed(i64);

    impl TravelEstimator for Fixed {
        fn estimate_seconds(&self, _origin: &str, _destination: &str) -> Result<i64> {
            Ok(self.0)
        }
    }

    struct Negative;

    impl TravelEstimator for Negative {
        fn estimate_seconds(&self, _origin: &str, _destination: &str) -> Result<i64> {
            Ok(-30)
        }
    }

    struct Down;

    impl TravelEstimator for Down {
        fn estimate_seconds(&self, _origin: &str, _destination: &str) -> Result<i64> {
            bail!("routing service unavailable")
        }
    }

    /// Sane estimates except for one destination off the end of the calendar.
    struct Overflowing;

    impl TravelEstimator for Overflowing {
        fn estimate_seconds(&self, _origin: &str, destination: &str) -> Result<i64> {
            Ok(if destination == "Edge of time" { i64::MAX / 2 } else { 900 })
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn skips_past_and_locationless_events() {
        let mut events = vec![
            Event::new("past", "Breakfast", now() - Duration::hours(1)).with_location("Cafe"),
            Event::new("remote", "Call", now() + Duration::hours(2)),
            Event::new("gym", "Gym", now() + Duration::hours(3)).with_location("Gym"),
        ];
        let report =
            recompute_schedules(&mut events, "Home", &Fixed(600), &RoutineDurations::default(), now())
                .unwrap();
        assert_eq!(report.updated, 1);
        assert_eq!(report.skipped, 2);
        assert!(events[0].schedule.is_none());
        assert!(events[1].schedule.is_none());
        assert_eq!(events[2].travel_duration_seconds, Some(600));
        assert!(events[2].schedule.is_some());
    }

    #[test]
    fn routing_failure_is_reported_not_raised() {
        let mut events = vec![Event::new("e1", "Dinner", now() + Duration::hours(9)).with_location("Diner")];
        let report =
            recompute_schedules(&mut events, "Home", &Down, &RoutineDurations::default(), now()).unwrap();
        assert_eq!(report.updated, 0);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].reason.contains("unavailable"));
        assert!(events[0].travel_duration_seconds.is_none());
    }

    #[test]
    fn negative_estimate_counts_as_failure() {
        let mut events = vec![Event::new("e1", "Dinner", now() + Duration::hours(9)).with_location("Diner")];
        let report =
            recompute_schedules(&mut events, "Home", &Negative, &RoutineDurations::default(), now()).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(events[0].schedule.is_none());
    }

    #[test]
    fn out_of_range_estimate_stays_with_its_event() {
        let mut events = vec![
            Event::new("e1", "Lunch", now() + Duration::hours(4)).with_location("Cafe"),
            Event::new("e2", "Voyage", now() + Duration::hours(5)).with_location("Edge of time"),
            Event::new("e3", "Dinner", now() + Duration::hours(9)).with_location("Diner"),
        ];
        let report =
            recompute_schedules(&mut events, "Home", &Overflowing, &RoutineDurations::default(), now())
                .unwrap();
        assert_eq!(report.updated, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].event_id, "e2");
        assert!(report.failures[0].reason.contains("out of range"));
        assert!(events[1].schedule.is_none());
        assert!(events[2].schedule.is_some());
    }

    #[test]
    fn bad_routine_aborts_up_front() {
        let mut events = vec![Event::new("e1", "Dinner", now() + Duration::hours(9)).with_location("Diner")];
        let routine = RoutineDurations {
            getting_ready_minutes: -1,
            ..RoutineDurations::default()
        };
        assert!(recompute_schedules(&mut events, "Home", &Fixed(60), &routine, now()).is_err());
        assert!(events[0].schedule.is_none());
    }

    #[test]
    fn rerun_is_idempotent() {
        let mut events = vec![Event::new("e1", "Dinner", now() + Duration::hours(9)).with_location("Diner")];
        let routine = RoutineDurations::default();
        recompute_schedules(&mut events, "Home", &Fixed(900), &routine, now()).unwrap();
        let first = events.clone();
        recompute_schedules(&mut events, "Home", &Fixed(900), &routine, now()).unwrap();
        assert_eq!(events, first);
    }
}
