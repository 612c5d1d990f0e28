use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::constants::TASKS_PATH;
use crate::error::Result;
use crate::session::resolve_session;
use crate::templates::{render, HomeTemplate, LoginTemplate, RegisterTemplate};
use crate::AppState;

/// Landing page; logged-in users go straight to their tasks
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    if resolve_session(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to(TASKS_PATH).into_response());
    }

    Ok(render(&HomeTemplate::default())?.into_response())
}

/// Registration form; logged-in users go straight to their tasks
pub async fn register_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    if resolve_session(&state.db, &jar).await?.is_some() {
        return Ok(Redirect::to(TASKS_PATH).into_response());
    }

    Ok(render(&RegisterTemplate::default())?.into_response())
}

pub async fn login_page() -> Result<Response> {
    Ok(render(&LoginTemplate::default())?.into_response())
}
