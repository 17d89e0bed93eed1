//! Calendar event as synced from the user's calendar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleChain;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Routed transit time, filled in by travel sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_duration_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleChain>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            location: None,
            travel_duration_seconds: None,
            schedule: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }

    /// Non-blank location, if any.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn has_location(&self) -> bool {
        self.location().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn blank_location_does_not_count() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let e = Event::new("e1", "Standup", now).with_location("   ");
        assert!(!e.has_location());
        assert!(Event::new("e2", "Gym", now).with_location("Main St 1").has_location());
    }

    #[test]
    fn upcoming_is_strictly_after_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert!(!Event::new("e1", "now", now).is_upcoming(now));
        assert!(Event::new("e2", "later", now + Duration::minutes(1)).is_upcoming(now));
    }

    #[test]
    fn roundtrips_without_optional_fields() {
        let json = r#"{"id":"e1","title":"Dinner","start_time":"2024-01-01T18:00:00Z"}"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert!(e.schedule.is_none());
        assert_eq!(serde_json::to_string(&e).unwrap(), json);
    }
}
