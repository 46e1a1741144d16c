use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            last_completed_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub progress: u8,
    pub remaining_days: i64,
    pub end_date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl Goal {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Returns a copy with one task's completion replaced and `progress`
    /// recomputed. `None` when the goal has no task with that id.
    pub fn with_task_completed(&self, task_id: &str, completed: bool) -> Option<Goal> {
        if !self.tasks.iter().any(|task| task.id == task_id) {
            return None;
        }

        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == task_id {
                    Task {
                        completed,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();

        Some(Goal {
            progress: progress_of(&tasks),
            tasks,
            ..self.clone()
        })
    }

    /// Copy with every task unchecked and `last_completed_date` cleared.
    pub fn reset_tasks(&self) -> Goal {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| Task {
                completed: false,
                last_completed_date: None,
                ..task.clone()
            })
            .collect();

        Goal {
            progress: progress_of(&tasks),
            tasks,
            ..self.clone()
        }
    }
}

/// `round(100 * completed / total)`, rounding halves up. Zero for no tasks.
pub fn progress_of(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Whole days from `now` until the start of `end_date` in `zone`, rounded up.
pub fn remaining_days(now: DateTime<Utc>, end_date: NaiveDate, zone: Tz) -> i64 {
    let millis = (start_of_day(end_date, zone) - now).num_milliseconds();
    let day = Duration::days(1).num_milliseconds();
    // ceiling division that also holds for negative spans
    -((-millis).div_euclid(day))
}

/// First instant of `date` in `zone`. Where midnight falls in a DST gap the
/// day starts an hour later.
fn start_of_day(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Sample goals shown when the dashboard is started with demo data.
pub fn demo_goals(now: DateTime<Utc>, zone: Tz) -> Vec<Goal> {
    let today = now.with_timezone(&zone).date_naive();
    let fitness_end = today + Duration::days(14);
    let reading_end = today + Duration::days(21);

    let fitness_tasks = vec![
        Task {
            completed: true,
            ..Task::new("1", "Morning workout")
        },
        Task::new("2", "Evening run"),
        Task {
            completed: true,
            ..Task::new("3", "Healthy meal prep")
        },
    ];
    let reading_tasks = vec![
        Task::new("1", "Read 30 pages"),
        Task {
            completed: true,
            ..Task::new("2", "Take notes")
        },
        Task::new("3", "Review chapter"),
    ];

    vec![
        Goal {
            id: "1".to_string(),
            title: "Fitness Goal".to_string(),
            progress: progress_of(&fitness_tasks),
            remaining_days: remaining_days(now, fitness_end, zone),
            end_date: fitness_end,
            tasks: fitness_tasks,
        },
        Goal {
            id: "2".to_string(),
            title: "Reading Goal".to_string(),
            progress: progress_of(&reading_tasks),
            remaining_days: remaining_days(now, reading_end, zone),
            end_date: reading_end,
            tasks: reading_tasks,
        },
    ]
}

#[derive(Debug, Deserialize)]
pub struct DraftForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub task_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub end_date: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleTaskRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct DraftTaskRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub now: DateTime<Utc>,
    pub local_date: NaiveDate,
    pub header_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Sao_Paulo;
    use chrono_tz::UTC;

    fn tasks(flags: &[bool]) -> Vec<Task> {
        flags
            .iter()
            .enumerate()
            .map(|(index, completed)| Task {
                completed: *completed,
                ..Task::new(index.to_string(), format!("task {index}"))
            })
            .collect()
    }

    fn goal(flags: &[bool]) -> Goal {
        let tasks = tasks(flags);
        Goal {
            id: "g".to_string(),
            title: "Goal".to_string(),
            progress: progress_of(&tasks),
            remaining_days: 5,
            end_date: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
            tasks,
        }
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(progress_of(&tasks(&[false, true, false])), 33);
        assert_eq!(progress_of(&tasks(&[true, true, false])), 67);
        assert_eq!(progress_of(&tasks(&[true, false])), 50);
        assert_eq!(progress_of(&tasks(&[true, true])), 100);
        assert_eq!(progress_of(&tasks(&[false; 8])), 0);
        // 1/8 = 12.5 rounds up
        let mut eighth = [false; 8];
        eighth[0] = true;
        assert_eq!(progress_of(&tasks(&eighth)), 13);
        assert_eq!(progress_of(&[]), 0);
    }

    #[test]
    fn toggling_first_task_recomputes_progress() {
        let before = goal(&[false, true, false]);
        assert_eq!(before.progress, 33);

        let after = before.with_task_completed("0", true).unwrap();
        assert_eq!(after.completed_count(), 2);
        assert_eq!(after.progress, 67);
        assert_eq!(after.title, before.title);
        assert_eq!(after.end_date, before.end_date);
        assert_eq!(after.remaining_days, before.remaining_days);
    }

    #[test]
    fn toggling_twice_restores_original() {
        let original = goal(&[true, false, true, false]);
        let once = original.with_task_completed("2", false).unwrap();
        let twice = once.with_task_completed("2", true).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn toggling_unknown_task_is_none() {
        assert!(goal(&[true]).with_task_completed("missing", false).is_none());
    }

    #[test]
    fn reset_tasks_keeps_identity_fields() {
        let mut original = goal(&[true, true, false]);
        original.tasks[0].last_completed_date = Some(Utc::now());
        let reset = original.reset_tasks();

        assert!(reset.tasks.iter().all(|task| !task.completed));
        assert!(reset.tasks.iter().all(|task| task.last_completed_date.is_none()));
        assert_eq!(reset.progress, 0);
        assert_eq!(reset.title, original.title);
        assert_eq!(reset.end_date, original.end_date);
        for (before, after) in original.tasks.iter().zip(&reset.tasks) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.text, after.text);
        }
    }

    #[test]
    fn remaining_days_rounds_partial_days_up() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 27).unwrap();

        let midnight = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        assert_eq!(remaining_days(midnight, end, UTC), 10);

        let morning = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        assert_eq!(remaining_days(morning, end, UTC), 10);

        let same_day = Utc.with_ymd_and_hms(2026, 10, 27, 15, 0, 0).unwrap();
        assert_eq!(remaining_days(same_day, end, UTC), 0);

        let two_days_late = Utc.with_ymd_and_hms(2026, 10, 29, 1, 0, 0).unwrap();
        assert_eq!(remaining_days(two_days_late, end, UTC), -2);
    }

    #[test]
    fn remaining_days_counts_to_local_midnight() {
        // 22:00 on 2026-10-17 in Sao Paulo, already 10-18 in UTC
        let late_evening = Utc.with_ymd_and_hms(2026, 10, 18, 1, 0, 0).unwrap();

        let ten_days = NaiveDate::from_ymd_opt(2026, 10, 27).unwrap();
        assert_eq!(remaining_days(late_evening, ten_days, Sao_Paulo), 10);

        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(remaining_days(late_evening, today, Sao_Paulo), 0);
    }

    #[test]
    fn demo_goals_have_consistent_progress() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let goals = demo_goals(now, UTC);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].progress, 67);
        assert_eq!(goals[1].progress, 33);
        assert_eq!(goals[0].remaining_days, 14);
        assert_eq!(goals[1].remaining_days, 21);
    }
}
