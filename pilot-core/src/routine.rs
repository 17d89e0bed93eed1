//! Per-user routine durations feeding the schedule back-calculation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// All values in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineDurations {
    /// Slack added on top of the routed travel time.
    pub travel_buffer_minutes: i64,
    pub getting_ready_minutes: i64,
    pub cooking_minutes: i64,
    /// Time between waking up and starting to cook.
    pub wake_up_margin_minutes: i64,
}

impl Default for RoutineDurations {
    fn default() -> Self {
        Self {
            travel_buffer_minutes: 15,
            getting_ready_minutes: 45,
            cooking_minutes: 30,
            wake_up_margin_minutes: 30,
        }
    }
}

impl RoutineDurations {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("travel_buffer_minutes", self.travel_buffer_minutes),
            ("getting_ready_minutes", self.getting_ready_minutes),
            ("cooking_minutes", self.cooking_minutes),
            ("wake_up_margin_minutes", self.wake_up_margin_minutes),
        ];
        for (field, value) in fields {
            if value < 0 {
                return Err(ValidationError::NegativeDuration { field, value });
            }
        }
        Ok(())
    }
}
