use pilot_core::{priority_score, rank_tasks, suggest_task, Mood, Priority, Task};
use proptest::prelude::*;

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((1u8..=5, priority_strategy(), any::<bool>()), 0..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (difficulty, priority, completed))| {
                let t = Task::new(format!("t{i}"), format!("task {i}"))
                    .with_difficulty(difficulty)
                    .with_priority(priority);
                if completed { t.completed() } else { t }
            })
            .collect()
    })
}

fn mood_strategy(range: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = Mood> {
    range.prop_map(|m| Mood::new(m).unwrap())
}

fn position(tasks: &[Task], id: &str) -> usize {
    tasks.iter().position(|t| t.id == id).unwrap()
}

proptest! {
    /// Low mood: only easy, incomplete tasks, ascending difficulty, stable.
    #[test]
    fn prop_low_mood_keeps_easy_tasks_in_order(tasks in tasks_strategy(), mood in mood_strategy(1..=2)) {
        let ranked = rank_tasks(&tasks, mood);
        prop_assert!(ranked.iter().all(|t| t.difficulty <= 3 && !t.completed));

        let eligible = tasks.iter().filter(|t| !t.completed && t.difficulty <= 3).count();
        prop_assert_eq!(ranked.len(), eligible);

        for w in ranked.windows(2) {
            prop_assert!(w[0].difficulty <= w[1].difficulty);
            if w[0].difficulty == w[1].difficulty {
                prop_assert!(position(&tasks, &w[0].id) < position(&tasks, &w[1].id));
            }
        }
    }

    /// Neutral/high mood: every incomplete task, descending score, stable.
    #[test]
    fn prop_scored_moods_sort_by_score(tasks in tasks_strategy(), mood in mood_strategy(3..=5)) {
        let ranked = rank_tasks(&tasks, mood);
        let open = tasks.iter().filter(|t| !t.completed).count();
        prop_assert_eq!(ranked.len(), open);
        prop_assert!(ranked.iter().all(|t| !t.completed));

        for w in ranked.windows(2) {
            let (a, b) = (priority_score(&w[0]), priority_score(&w[1]));
            prop_assert!(a >= b);
            if a == b {
                prop_assert!(position(&tasks, &w[0].id) < position(&tasks, &w[1].id));
            }
        }
    }

    #[test]
    fn prop_ranking_is_idempotent_and_pure(tasks in tasks_strategy(), mood in mood_strategy(1..=5)) {
        let before = tasks.clone();
        prop_assert_eq!(rank_tasks(&tasks, mood), rank_tasks(&tasks, mood));
        prop_assert_eq!(tasks, before);
    }

    /// Low-mood suggestion is the first task with the global-minimum eligible difficulty.
    #[test]
    fn prop_low_suggestion_is_global_minimum(tasks in tasks_strategy(), mood in mood_strategy(1..=2)) {
        let eligible: Vec<&Task> = tasks.iter().filter(|t| !t.completed && t.difficulty <= 3).collect();
        match suggest_task(&tasks, mood) {
            None => prop_assert!(eligible.is_empty()),
            Some(pick) => {
                let min = eligible.iter().map(|t| t.difficulty).min().unwrap();
                let first_min = eligible.iter().find(|t| t.difficulty == min).unwrap();
                prop_assert_eq!(&pick.id, &first_min.id);
            }
        }
    }
}
