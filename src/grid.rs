use crate::dashboard::Action;
use crate::models::Goal;

/// What a goal card's controls report upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    TaskToggled { task_id: String, completed: bool },
    DeleteRequested,
}

/// Turns an event from the card of `goal_id` into a collection-level action.
///
/// Toggles become a full replacement goal with `progress` already
/// recomputed, so the dashboard can store the payload as is. Events for a
/// goal (or task) that is no longer in `goals` are dropped.
pub fn translate(goals: &[Goal], goal_id: &str, event: CardEvent) -> Option<Action> {
    let goal = goals.iter().find(|goal| goal.id == goal_id)?;

    match event {
        CardEvent::TaskToggled { task_id, completed } => goal
            .with_task_completed(&task_id, completed)
            .map(Action::UpdateGoal),
        CardEvent::DeleteRequested => Some(Action::DeleteGoal(goal.id.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{progress_of, Task};
    use chrono::NaiveDate;

    fn goal(id: &str, flags: &[bool]) -> Goal {
        let tasks: Vec<Task> = flags
            .iter()
            .enumerate()
            .map(|(index, completed)| Task {
                completed: *completed,
                ..Task::new(format!("t{index}"), format!("task {index}"))
            })
            .collect();
        Goal {
            id: id.to_string(),
            title: format!("goal {id}"),
            progress: progress_of(&tasks),
            remaining_days: 3,
            end_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            tasks,
        }
    }

    #[test]
    fn toggle_emits_recomputed_goal() {
        let goals = vec![goal("a", &[true]), goal("b", &[false, true, false])];
        let event = CardEvent::TaskToggled {
            task_id: "t0".to_string(),
            completed: true,
        };

        match translate(&goals, "b", event) {
            Some(Action::UpdateGoal(updated)) => {
                assert_eq!(updated.id, "b");
                assert_eq!(updated.progress, 67);
                assert!(updated.tasks[0].completed);
                assert_eq!(updated.title, goals[1].title);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn delete_is_forwarded_with_goal_id() {
        let goals = vec![goal("a", &[true])];
        assert_eq!(
            translate(&goals, "a", CardEvent::DeleteRequested),
            Some(Action::DeleteGoal("a".to_string()))
        );
    }

    #[test]
    fn unknown_goal_or_task_is_dropped() {
        let goals = vec![goal("a", &[true])];
        assert_eq!(translate(&goals, "zzz", CardEvent::DeleteRequested), None);
        let event = CardEvent::TaskToggled {
            task_id: "nope".to_string(),
            completed: true,
        };
        assert_eq!(translate(&goals, "a", event), None);
    }
}
