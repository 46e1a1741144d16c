use crate::models::{remaining_days, Goal, Task};
use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info};

/// Everything that can change the dashboard. All mutation goes through
/// [`Dashboard::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenDialog,
    CloseDialog,
    EditTitle(String),
    EditEndDate(String),
    EditTaskText(String),
    AddDraftTask,
    RemoveDraftTask(String),
    SubmitGoal,
    /// Creates a goal straight from the given fields without touching the
    /// draft or the dialog.
    CreateGoal {
        title: String,
        end_date: String,
        tasks: Vec<String>,
    },
    UpdateGoal(Goal),
    DeleteGoal(String),
    ClockTick,
    ResetCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

/// The "create goal" form while it is being filled in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Draft {
    pub title: String,
    pub end_date: Option<NaiveDate>,
    pub tasks: Vec<Task>,
    pub task_text: String,
}

impl Draft {
    pub fn is_submittable(&self, today: NaiveDate) -> bool {
        !self.title.trim().is_empty()
            && !self.tasks.is_empty()
            && self.end_date.is_some_and(|end| end >= today)
    }
}

#[derive(Debug)]
pub struct Dashboard {
    zone: Tz,
    goals: Vec<Goal>,
    draft: Draft,
    dialog_open: bool,
    current_time: DateTime<Utc>,
    last_reset_day: NaiveDate,
    last_id: i64,
}

impl Dashboard {
    pub fn new(zone: Tz, now: DateTime<Utc>) -> Self {
        Self {
            zone,
            goals: Vec::new(),
            draft: Draft::default(),
            dialog_open: false,
            current_time: now,
            last_reset_day: now.with_timezone(&zone).date_naive(),
            last_id: 0,
        }
    }

    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.goals = goals;
        self
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    /// Calendar date of `now` in the dashboard's zone.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.zone).date_naive()
    }

    /// Header line such as `sábado, 17 de outubro`, from the last clock tick.
    pub fn header_date(&self) -> String {
        self.current_time
            .with_timezone(&self.zone)
            .format_localized("%A, %d de %B", Locale::pt_BR)
            .to_string()
    }

    pub fn apply(&mut self, action: Action, now: DateTime<Utc>) -> Outcome {
        let outcome = match action {
            Action::OpenDialog => {
                self.dialog_open = true;
                Outcome::Applied
            }
            Action::CloseDialog => {
                self.dialog_open = false;
                Outcome::Applied
            }
            Action::EditTitle(title) => {
                self.draft.title = title;
                Outcome::Applied
            }
            Action::EditEndDate(text) => {
                self.draft.end_date = parse_end_date(&text);
                Outcome::Applied
            }
            Action::EditTaskText(text) => {
                self.draft.task_text = text;
                Outcome::Applied
            }
            Action::AddDraftTask => self.add_draft_task(now),
            Action::RemoveDraftTask(task_id) => self.remove_draft_task(&task_id),
            Action::SubmitGoal => self.submit_goal(now),
            Action::CreateGoal {
                title,
                end_date,
                tasks,
            } => self.create_goal(title, end_date, tasks, now),
            Action::UpdateGoal(goal) => self.update_goal(goal),
            Action::DeleteGoal(goal_id) => self.delete_goal(&goal_id),
            Action::ClockTick => {
                self.current_time = now;
                debug!(now = %now, "clock tick");
                Outcome::Applied
            }
            Action::ResetCheck => self.reset_check(now),
        };

        if outcome == Outcome::Ignored {
            debug!("action ignored");
        }
        outcome
    }

    fn add_draft_task(&mut self, now: DateTime<Utc>) -> Outcome {
        let text = self.draft.task_text.trim().to_string();
        if text.is_empty() {
            return Outcome::Ignored;
        }

        let task = Task::new(self.next_id(now), text);
        self.draft.tasks.push(task);
        self.draft.task_text.clear();
        Outcome::Applied
    }

    fn remove_draft_task(&mut self, task_id: &str) -> Outcome {
        let before = self.draft.tasks.len();
        self.draft.tasks.retain(|task| task.id != task_id);
        if self.draft.tasks.len() == before {
            Outcome::Ignored
        } else {
            Outcome::Applied
        }
    }

    fn submit_goal(&mut self, now: DateTime<Utc>) -> Outcome {
        let draft = self.draft.clone();
        let outcome = self.commit_draft(draft, now);
        if outcome == Outcome::Applied {
            self.draft = Draft::default();
            self.dialog_open = false;
        }
        outcome
    }

    fn create_goal(
        &mut self,
        title: String,
        end_date: String,
        texts: Vec<String>,
        now: DateTime<Utc>,
    ) -> Outcome {
        let mut tasks = Vec::with_capacity(texts.len());
        for text in texts {
            let text = text.trim();
            if !text.is_empty() {
                tasks.push(Task::new(self.next_id(now), text));
            }
        }

        let draft = Draft {
            title,
            end_date: parse_end_date(&end_date),
            tasks,
            task_text: String::new(),
        };
        self.commit_draft(draft, now)
    }

    /// Appends a goal built from `draft` when it is submittable.
    fn commit_draft(&mut self, draft: Draft, now: DateTime<Utc>) -> Outcome {
        if !draft.is_submittable(self.local_date(now)) {
            return Outcome::Ignored;
        }
        let Some(end_date) = draft.end_date else {
            return Outcome::Ignored;
        };

        let goal = Goal {
            id: self.next_id(now),
            title: draft.title.trim().to_string(),
            progress: 0,
            remaining_days: remaining_days(now, end_date, self.zone),
            end_date,
            tasks: draft.tasks,
        };
        info!(goal_id = %goal.id, title = %goal.title, tasks = goal.tasks.len(), "goal created");

        let mut goals = self.goals.clone();
        goals.push(goal);
        self.goals = goals;
        Outcome::Applied
    }

    fn update_goal(&mut self, updated: Goal) -> Outcome {
        if self.goal(&updated.id).is_none() {
            return Outcome::Ignored;
        }

        self.goals = self
            .goals
            .iter()
            .map(|goal| {
                if goal.id == updated.id {
                    updated.clone()
                } else {
                    goal.clone()
                }
            })
            .collect();
        Outcome::Applied
    }

    fn delete_goal(&mut self, goal_id: &str) -> Outcome {
        if self.goal(goal_id).is_none() {
            return Outcome::Ignored;
        }

        self.goals = self
            .goals
            .iter()
            .filter(|goal| goal.id != goal_id)
            .cloned()
            .collect();
        info!(goal_id, "goal deleted");
        Outcome::Applied
    }

    /// Clears task completion on the first check whose local date is past the
    /// last reset day. Later checks on the same day are no-ops.
    fn reset_check(&mut self, now: DateTime<Utc>) -> Outcome {
        let today = self.local_date(now);
        if today <= self.last_reset_day {
            return Outcome::Ignored;
        }

        self.last_reset_day = today;
        self.goals = self.goals.iter().map(Goal::reset_tasks).collect();
        info!(%today, zone = %self.zone, goals = self.goals.len(), "daily reset");
        Outcome::Applied
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }
}

fn parse_end_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
