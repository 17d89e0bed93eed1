//! Push reminder projection for schedule milestones.
//!
//! Delivery (web push, subscriptions) is the app's job; this only decides
//! what should be sent and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::schedule::Milestone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderIntent {
    pub intent_id: String,
    pub event_id: String,
    pub milestone: Milestone,
    pub title: String,
    pub body: String,
    pub send_at_utc: DateTime<Utc>,
    pub dedupe_key: String,
}

/// One reminder per milestone still in the future. Events without a
/// computed schedule yield nothing.
pub fn project_event_reminders(event: &Event, now: DateTime<Utc>) -> Vec<ReminderIntent> {
    let Some(chain) = event.schedule else {
        return vec![];
    };

    chain
        .milestones()
        .into_iter()
        .filter(|(_, send_at)| *send_at > now)
        .map(|(milestone, send_at)| {
            let slug = milestone.slug();
            ReminderIntent {
                intent_id: format!("ri-{}-{}", event.id, slug),
                event_id: event.id.clone(),
                milestone,
                title: format!("{}: {}", milestone.label(), event.title),
                body: format!(
                    "{} now to make {} at {}.",
                    milestone.label(),
                    event.title,
                    event.start_time.format("%H:%M UTC")
                ),
                send_at_utc: send_at,
                // Unique per concrete slot so a moved event re-notifies.
                dedupe_key: format!("{}:{}:{}", event.id, slug, send_at.timestamp()),
            }
        })
        .collect()
}
