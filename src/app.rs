use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dialog/open", post(handlers::open_dialog))
        .route("/dialog/close", post(handlers::close_dialog))
        .route("/draft/tasks", post(handlers::add_draft_task))
        .route("/draft/tasks/:task_id/remove", post(handlers::remove_draft_task))
        .route("/goals", post(handlers::submit_goal))
        .route("/goals/:goal_id/tasks/:task_id/toggle", post(handlers::toggle_task))
        .route("/goals/:goal_id/delete", post(handlers::delete_goal))
        .route("/api/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/api/goals/:goal_id", delete(handlers::remove_goal))
        .route("/api/goals/:goal_id/tasks/:task_id", put(handlers::set_task_completed))
        .route("/api/draft", get(handlers::get_draft))
        .route("/api/draft/tasks", post(handlers::push_draft_task))
        .route("/api/draft/tasks/:task_id", delete(handlers::pop_draft_task))
        .route("/api/today", get(handlers::get_today))
        .with_state(state)
}
