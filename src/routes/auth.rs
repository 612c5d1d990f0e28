use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::{CookieJar, WithRejection};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_USERNAME_REQUIRED, HOME_PATH, MSG_REGISTERED, TASKS_PATH};
use crate::db;
use crate::error::{AppError, Result};
use crate::security::validate_password_strength;
use crate::session::{clear_session_cookie, session_cookie};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: &'static str,
    pub redirect: &'static str,
}

/// Register a new user
///
/// Checks run in order and the first failure is returned:
/// - username present
/// - username not taken (409)
/// - password meets the strength policy (400)
/// - password and confirmation match (400)
///
/// The password is hashed with Argon2 before storage.
pub async fn register_user(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<RegisterForm>, AppError>,
) -> Result<Json<RegisterResponse>> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(AppError::invalid("username", ERR_USERNAME_REQUIRED));
    }

    if db::users::username_exists(&state.db, username).await? {
        tracing::info!("Registration rejected, username taken: {}", username);
        return Err(AppError::UsernameTaken);
    }

    validate_password_strength(&form.password)?;

    if form.password != form.confirm_password {
        return Err(AppError::PasswordMismatch);
    }

    // Argon2 is deliberately slow; keep it off the async workers
    let hasher = state.hasher.clone();
    let password = form.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

    let user_id = db::users::insert_user(&state.db, username, &password_hash).await?;

    tracing::info!("New user registered: {} (id {})", username, user_id);

    Ok(Json(RegisterResponse {
        message: MSG_REGISTERED.to_string(),
    }))
}

/// Log a user in
///
/// On success the session cookie is set and the client is told where to go
/// next. Unknown usernames and wrong passwords are reported separately.
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let username = form.username.trim();

    let user = match db::users::find_user_by_username(&state.db, username).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login attempt for unknown user: {}", username);
            return Err(AppError::UserNotFound);
        }
    };

    let hasher = state.hasher.clone();
    let password = form.password;
    let stored_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await?;

    if !verified {
        tracing::warn!("Incorrect password for user: {}", user.username);
        return Err(AppError::IncorrectPassword);
    }

    let jar = jar.add(session_cookie(user.id, state.config.secure_cookies));
    tracing::info!("User {} logged in (id {})", user.username, user.id);

    Ok((
        jar,
        Json(LoginResponse {
            success: "true",
            redirect: TASKS_PATH,
        }),
    ))
}

/// Clear the session cookie and return to the landing page
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(clear_session_cookie()), Redirect::to(HOME_PATH))
}
