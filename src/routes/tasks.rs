use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::constants::{ERR_EMPTY_TITLE, ERR_INVALID_TASK_ID, TASKS_PATH};
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{SessionUser, Todo};
use crate::templates::{render, TasksTemplate};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskParams {
    pub id: Option<String>,
}

fn parse_task_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid("id", ERR_INVALID_TASK_ID))
}

fn required_title(raw: &str) -> Result<&str> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::invalid("title", ERR_EMPTY_TITLE));
    }
    Ok(title)
}

/// Render the caller's task list
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Html<String>> {
    let todos = db::todos::list_todos_for_user(&state.db, user.id).await?;
    tracing::debug!("Found {} todos for user {}", todos.len(), user.username);

    render(&TasksTemplate::new(&user.username, &todos))
}

/// Create a task for the caller; new tasks start out pending
pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    WithRejection(Form(form), _): WithRejection<Form<AddTaskForm>, AppError>,
) -> Result<Redirect> {
    let title = required_title(&form.title)?;

    let inserted = db::todos::insert_todo(&state.db, user.id, title).await?;
    if inserted == 0 {
        tracing::error!("Insert for user {} affected no rows", user.username);
        return Err(AppError::TaskNotCreated);
    }

    Ok(Redirect::to(TASKS_PATH))
}

/// Update a task's title and status
///
/// A missing task is a 404; a task owned by someone else is a 401.
pub async fn edit_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    WithRejection(Form(form), _): WithRejection<Form<EditTaskForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_task_id(&form.id)?;
    let title = required_title(&form.title)?;
    let completed = Todo::parse_status(form.status.as_deref());

    match db::todos::find_todo_owner(&state.db, id).await? {
        None => return Err(AppError::TaskNotFound),
        Some(owner) if owner != user.id => {
            tracing::warn!(
                "User {} tried to edit task {} owned by user {}",
                user.id,
                id,
                owner
            );
            return Err(AppError::NotTaskOwner);
        }
        Some(_) => {}
    }

    // Scoped by owner as well, in case the task vanished since the check
    let updated = db::todos::update_todo(&state.db, id, user.id, title, completed).await?;
    if updated == 0 {
        return Err(AppError::TaskNotFound);
    }

    Ok(Redirect::to(TASKS_PATH))
}

/// Delete a task the caller owns
///
/// "No such task" and "not your task" both answer 403 so callers cannot
/// probe for other users' task IDs.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    WithRejection(Query(params), _): WithRejection<Query<DeleteTaskParams>, AppError>,
) -> Result<Redirect> {
    let id = parse_task_id(params.id.as_deref().unwrap_or_default())?;

    let deleted = db::todos::delete_todo(&state.db, id, user.id).await?;
    if deleted == 0 {
        tracing::warn!("User {} could not delete task {}", user.id, id);
        return Err(AppError::DeleteForbidden);
    }

    Ok(Redirect::to(TASKS_PATH))
}
