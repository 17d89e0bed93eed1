//! Task model consumed by the mood-based prioritizer.
//!
//! Storage lives elsewhere; this is the shape the app hands us.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Scoring weight: high=3, medium=2, low=1.
    pub const fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    /// 1-5, higher is harder.
    pub difficulty: u8,
    pub priority: Priority,

    #[serde(default)]
    pub completed: bool,

    /// Minutes.
    #[serde(default, alias = "estimatedTime", skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            difficulty: 3,
            priority: Priority::Medium,
            completed: false,
            estimated_time: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_time = Some(minutes);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ValidationError::DifficultyOutOfRange {
                task_id: self.id.clone(),
                value: self.difficulty,
            });
        }
        Ok(())
    }
}

/// Validate a loaded task set, stopping at the first bad task.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    tasks.iter().try_for_each(Task::validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_weights() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
    }

    #[test]
    fn difficulty_out_of_range_is_rejected() {
        let t = Task::new("t1", "too hard").with_difficulty(6);
        assert_eq!(
            t.validate(),
            Err(ValidationError::DifficultyOutOfRange {
                task_id: "t1".to_string(),
                value: 6
            })
        );
        assert!(Task::new("t2", "zero").with_difficulty(0).validate().is_err());
    }

    #[test]
    fn validate_tasks_stops_on_first_bad() {
        let tasks = vec![
            Task::new("ok", "fine").with_difficulty(5),
            Task::new("bad", "nope").with_difficulty(9),
        ];
        let err = validate_tasks(&tasks).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn deserializes_app_payload() {
        let json = r#"{
            "id": "a1",
            "title": "Laundry",
            "difficulty": 2,
            "priority": "high",
            "completed": false,
            "estimatedTime": 40
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.estimated_time, Some(40));
    }

    #[test]
    fn completed_defaults_to_false() {
        let json = r#"{"id":"a2","title":"Read","difficulty":1,"priority":"low"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert!(!t.completed);
        assert_eq!(t.estimated_time, None);
    }
}
