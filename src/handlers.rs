use crate::dashboard::{Action, Draft, Outcome};
use crate::errors::AppError;
use crate::grid::{translate, CardEvent};
use crate::models::{
    CreateGoalRequest, DraftForm, DraftTaskRequest, Goal, TodayResponse, ToggleForm,
    ToggleTaskRequest,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let now = state.clock.now();
    let dashboard = state.dashboard.lock().await;
    Html(render_index(&dashboard, now))
}

pub async fn open_dialog(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::OpenDialog).await;
    Redirect::to("/")
}

pub async fn close_dialog(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::CloseDialog).await;
    Redirect::to("/")
}

pub async fn add_draft_task(State(state): State<AppState>, Form(form): Form<DraftForm>) -> Redirect {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    for action in store_draft_fields(form) {
        dashboard.apply(action, now);
    }
    dashboard.apply(Action::AddDraftTask, now);
    Redirect::to("/")
}

pub async fn remove_draft_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Form(form): Form<DraftForm>,
) -> Redirect {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    for action in store_draft_fields(form) {
        dashboard.apply(action, now);
    }
    dashboard.apply(Action::RemoveDraftTask(task_id), now);
    Redirect::to("/")
}

pub async fn submit_goal(State(state): State<AppState>, Form(form): Form<DraftForm>) -> Redirect {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    for action in store_draft_fields(form) {
        dashboard.apply(action, now);
    }
    if dashboard.apply(Action::SubmitGoal, now) == Outcome::Ignored {
        debug!("goal form submitted while incomplete");
    }
    Redirect::to("/")
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path((goal_id, task_id)): Path<(String, String)>,
    Form(form): Form<ToggleForm>,
) -> Redirect {
    let event = CardEvent::TaskToggled {
        task_id,
        completed: form.completed,
    };
    card_event(&state, &goal_id, event).await;
    Redirect::to("/")
}

pub async fn delete_goal(State(state): State<AppState>, Path(goal_id): Path<String>) -> Redirect {
    card_event(&state, &goal_id, CardEvent::DeleteRequested).await;
    Redirect::to("/")
}

pub async fn list_goals(State(state): State<AppState>) -> Json<Vec<Goal>> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.goals().to_vec())
}

/// Creates a goal from the request body. The page's draft is left as it is.
pub async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    let action = Action::CreateGoal {
        title: payload.title,
        end_date: payload.end_date,
        tasks: payload.tasks,
    };

    match dashboard.apply(action, now) {
        Outcome::Applied => dashboard
            .goals()
            .last()
            .cloned()
            .map(|goal| (StatusCode::CREATED, Json(goal)))
            .ok_or_else(|| AppError::bad_request("goal was not created")),
        Outcome::Ignored => Err(AppError::bad_request(
            "a goal needs a title, at least one task and an end date that is not in the past",
        )),
    }
}

pub async fn set_task_completed(
    State(state): State<AppState>,
    Path((goal_id, task_id)): Path<(String, String)>,
    Json(payload): Json<ToggleTaskRequest>,
) -> Result<Json<Goal>, AppError> {
    let event = CardEvent::TaskToggled {
        task_id,
        completed: payload.completed,
    };
    if card_event(&state, &goal_id, event).await == Outcome::Ignored {
        return Err(AppError::not_found("no such goal or task"));
    }

    let dashboard = state.dashboard.lock().await;
    dashboard
        .goal(&goal_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("no such goal"))
}

pub async fn remove_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<StatusCode, AppError> {
    match card_event(&state, &goal_id, CardEvent::DeleteRequested).await {
        Outcome::Applied => Ok(StatusCode::NO_CONTENT),
        Outcome::Ignored => Err(AppError::not_found("no such goal")),
    }
}

pub async fn get_draft(State(state): State<AppState>) -> Json<Draft> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.draft().clone())
}

pub async fn push_draft_task(
    State(state): State<AppState>,
    Json(payload): Json<DraftTaskRequest>,
) -> Result<Json<Draft>, AppError> {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    dashboard.apply(Action::EditTaskText(payload.text), now);
    match dashboard.apply(Action::AddDraftTask, now) {
        Outcome::Applied => Ok(Json(dashboard.draft().clone())),
        Outcome::Ignored => Err(AppError::bad_request("task text must not be blank")),
    }
}

pub async fn pop_draft_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Draft>, AppError> {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    match dashboard.apply(Action::RemoveDraftTask(task_id), now) {
        Outcome::Applied => Ok(Json(dashboard.draft().clone())),
        Outcome::Ignored => Err(AppError::not_found("no such draft task")),
    }
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let now = state.clock.now();
    let dashboard = state.dashboard.lock().await;
    Json(TodayResponse {
        now,
        local_date: dashboard.local_date(now),
        header_date: dashboard.header_date(),
    })
}

/// Routes a card event through the collection translation into the
/// dashboard under one lock.
async fn card_event(state: &AppState, goal_id: &str, event: CardEvent) -> Outcome {
    let now = state.clock.now();
    let mut dashboard = state.dashboard.lock().await;
    let action = translate(dashboard.goals(), goal_id, event);
    match action {
        Some(action) => dashboard.apply(action, now),
        None => {
            debug!(goal_id, "card event for unknown goal or task dropped");
            Outcome::Ignored
        }
    }
}

fn store_draft_fields(form: DraftForm) -> [Action; 3] {
    [
        Action::EditTitle(form.title),
        Action::EditEndDate(form.end_date),
        Action::EditTaskText(form.task_text),
    ]
}
