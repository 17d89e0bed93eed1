//! Mood-based task prioritization.
//!
//! Each mood band picks a ranking strategy; the neutral and high bands share
//! one scoring function. All sorts are stable so equal scores keep input order.

use std::cmp::Reverse;

use crate::mood::{Mood, MoodBand};
use crate::task::{Priority, Task};

/// Hardest difficulty still offered when mood is low.
pub const LOW_MOOD_MAX_DIFFICULTY: u8 = 3;

/// Difficulty at which a task counts as a stretch on a good day.
pub const HIGH_MOOD_MIN_DIFFICULTY: u8 = 4;

/// `weight(priority) * 10 + difficulty`
pub fn priority_score(task: &Task) -> u32 {
    task.priority.weight() * 10 + u32::from(task.difficulty)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Keep only easy tasks, easiest first.
    EasiestFirst { drop_hard: bool },
    /// Highest score first.
    ScoreDescending,
}

impl MoodBand {
    fn strategy(self, drop_hard: bool) -> Strategy {
        match self {
            MoodBand::Low => Strategy::EasiestFirst { drop_hard },
            MoodBand::Neutral | MoodBand::High => Strategy::ScoreDescending,
        }
    }
}

impl Strategy {
    fn apply(self, tasks: &[Task]) -> Vec<Task> {
        let mut out: Vec<Task> = tasks.iter().filter(|t| !t.completed).cloned().collect();
        match self {
            Strategy::EasiestFirst { drop_hard } => {
                if drop_hard {
                    out.retain(|t| t.difficulty <= LOW_MOOD_MAX_DIFFICULTY);
                }
                out.sort_by_key(|t| t.difficulty);
            }
            Strategy::ScoreDescending => {
                out.sort_by_key(|t| Reverse(priority_score(t)));
            }
        }
        out
    }
}

/// Rank incomplete tasks for the given mood, most recommended first.
///
/// Low mood drops tasks harder than [`LOW_MOOD_MAX_DIFFICULTY`] entirely.
pub fn rank_tasks(tasks: &[Task], mood: Mood) -> Vec<Task> {
    mood.band().strategy(true).apply(tasks)
}

/// Reorder-only variant: low mood sorts easiest first but keeps hard tasks
/// at the tail instead of dropping them.
///
/// Intentionally not unified with [`rank_tasks`]; the two disagree for low
/// mood and product has not picked one.
pub fn reorder_tasks_by_mood(tasks: &[Task], mood: Mood) -> Vec<Task> {
    mood.band().strategy(false).apply(tasks)
}

/// Pick one task to highlight. Uses its own fallback chain, so this is not
/// the head of [`rank_tasks`].
pub fn suggest_task(tasks: &[Task], mood: Mood) -> Option<&Task> {
    let open: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();

    match mood.band() {
        MoodBand::Low => open
            .iter()
            .filter(|t| t.difficulty <= LOW_MOOD_MAX_DIFFICULTY)
            // min_by_key keeps the first of equal minima
            .min_by_key(|t| t.difficulty)
            .copied(),
        MoodBand::Neutral => open
            .iter()
            .find(|t| t.priority == Priority::Medium)
            .or_else(|| open.first())
            .copied(),
        MoodBand::High => open
            .iter()
            .find(|t| t.difficulty >= HIGH_MOOD_MIN_DIFFICULTY && t.priority == Priority::High)
            .or_else(|| open.iter().find(|t| t.priority == Priority::High))
            .or_else(|| open.first())
            .copied(),
    }
}
