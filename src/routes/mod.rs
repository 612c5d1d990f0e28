pub mod auth;
pub mod health;
pub mod pages;
pub mod tasks;

pub use auth::{login_user, logout, register_user};
pub use health::health_check;
pub use pages::{home, login_page, register_page};
pub use tasks::{add_task, delete_task, edit_task, list_tasks};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::session::require_session;
use crate::AppState;

/// Build the application router
///
/// Task routes sit behind the session gate; everything else is public.
/// Static assets are served from `config.static_dir` under `/static/`.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/tasks", get(list_tasks))
        .route("/add", post(add_task))
        .route("/edit", post(edit_task))
        .route("/delete", get(delete_task).post(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
        .route("/register", get(register_page).post(register_user))
        .route("/login", get(login_page).post(login_user))
        .route("/logout", get(logout).post(logout))
        .route("/health", get(health_check))
        .merge(protected)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
