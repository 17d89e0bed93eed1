//! Back-calculate preparation milestones from an event start time.
//!
//! Pure subtraction: leave <- get ready <- cook <- wake up. Instants may land
//! on the previous calendar day; display code deals with that.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::routine::RoutineDurations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChain {
    pub leave_time: DateTime<Utc>,
    pub get_ready_time: DateTime<Utc>,
    pub cook_start_time: DateTime<Utc>,
    pub wake_up_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    WakeUp,
    StartCooking,
    GetReady,
    Leave,
}

impl Milestone {
    pub fn label(self) -> &'static str {
        match self {
            Milestone::WakeUp => "Wake up",
            Milestone::StartCooking => "Start cooking",
            Milestone::GetReady => "Get ready",
            Milestone::Leave => "Leave",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Milestone::WakeUp => "wake_up",
            Milestone::StartCooking => "start_cooking",
            Milestone::GetReady => "get_ready",
            Milestone::Leave => "leave",
        }
    }
}

impl ScheduleChain {
    /// Milestones in chronological order (wake up first).
    pub fn milestones(&self) -> [(Milestone, DateTime<Utc>); 4] {
        [
            (Milestone::WakeUp, self.wake_up_time),
            (Milestone::StartCooking, self.cook_start_time),
            (Milestone::GetReady, self.get_ready_time),
            (Milestone::Leave, self.leave_time),
        ]
    }
}

pub fn back_calculate(
    event_start: DateTime<Utc>,
    travel_duration_seconds: i64,
    routine: &RoutineDurations,
) -> Result<ScheduleChain, ValidationError> {
    if travel_duration_seconds < 0 {
        return Err(ValidationError::NegativeDuration {
            field: "travel_duration_seconds",
            value: travel_duration_seconds,
        });
    }
    routine.validate()?;

    let buffer_seconds = routine
        .travel_buffer_minutes
        .checked_mul(60)
        .ok_or(out_of_range("travel_buffer_minutes", routine.travel_buffer_minutes))?;
    let transit_seconds = travel_duration_seconds
        .checked_add(buffer_seconds)
        .ok_or(out_of_range("travel_duration_seconds", travel_duration_seconds))?;

    let leave_time = earlier(
        event_start,
        TimeDelta::try_seconds(transit_seconds),
        "travel_duration_seconds",
        transit_seconds,
    )?;
    let get_ready_time = earlier(
        leave_time,
        TimeDelta::try_minutes(routine.getting_ready_minutes),
        "getting_ready_minutes",
        routine.getting_ready_minutes,
    )?;
    let cook_start_time = earlier(
        get_ready_time,
        TimeDelta::try_minutes(routine.cooking_minutes),
        "cooking_minutes",
        routine.cooking_minutes,
    )?;
    let wake_up_time = earlier(
        cook_start_time,
        TimeDelta::try_minutes(routine.wake_up_margin_minutes),
        "wake_up_margin_minutes",
        routine.wake_up_margin_minutes,
    )?;

    Ok(ScheduleChain {
        leave_time,
        get_ready_time,
        cook_start_time,
        wake_up_time,
    })
}

/// `at - delta`, or an out-of-range error if either step leaves chrono's range.
fn earlier(
    at: DateTime<Utc>,
    delta: Option<TimeDelta>,
    field: &'static str,
    value: i64,
) -> Result<DateTime<Utc>, ValidationError> {
    delta
        .and_then(|d| at.checked_sub_signed(d))
        .ok_or(out_of_range(field, value))
}

fn out_of_range(field: &'static str, value: i64) -> ValidationError {
    ValidationError::DurationOutOfRange { field, value }
}
