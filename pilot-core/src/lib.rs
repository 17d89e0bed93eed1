//! pilot-core: mood-based task ranking and travel-aware schedule back-calculation
//! for the life-pilot app.

pub mod batch;
pub mod error;
pub mod event;
pub mod mood;
pub mod prioritizer;
pub mod reminders;
pub mod routine;
pub mod schedule;
pub mod task;
pub mod time;

pub use batch::{recompute_schedules, BatchFailure, BatchReport, TravelEstimator};
pub use error::ValidationError;
pub use event::Event;
pub use mood::{Mood, MoodBand};
pub use prioritizer::{priority_score, rank_tasks, reorder_tasks_by_mood, suggest_task};
pub use reminders::{project_event_reminders, ReminderIntent};
pub use routine::RoutineDurations;
pub use schedule::{back_calculate, Milestone, ScheduleChain};
pub use task::{validate_tasks, Priority, Task};
