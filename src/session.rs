//! Cookie-based sessions and the authentication gate.
//!
//! The `session` cookie holds the logged-in user's numeric ID in clear text,
//! unsigned and without expiry. Any client can claim to be another user by
//! sending a different ID. This is a known weakness: a deployment that needs
//! real security must replace the cookie value with an opaque token checked
//! against a server-side session store.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::constants::{LOGIN_PATH, SESSION_COOKIE};
use crate::db::{self, Db};
use crate::error::Result;
use crate::models::SessionUser;
use crate::AppState;

/// Build the cookie that logs `user_id` in
pub fn session_cookie(user_id: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Build the removal cookie sent on logout
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Map the request's session cookie to a user
///
/// A missing, empty or non-numeric cookie, or an ID with no matching user,
/// all resolve to `None`. Only storage failures are errors.
pub async fn resolve_session(pool: &Db, jar: &CookieJar) -> Result<Option<SessionUser>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let Ok(id) = cookie.value().trim().parse::<i64>() else {
        if !cookie.value().is_empty() {
            tracing::warn!("Malformed session cookie");
        }
        return Ok(None);
    };

    match db::users::find_username_by_id(pool, id).await? {
        Some(username) => Ok(Some(SessionUser { id, username })),
        None => {
            tracing::warn!("Session cookie names unknown user ID {}", id);
            Ok(None)
        }
    }
}

/// Authentication gate for protected routes
///
/// Anonymous requests are redirected to the login page. Otherwise the
/// resolved [`SessionUser`] is stored in the request extensions for the
/// handler to pick up.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state.db, &jar).await {
        Ok(Some(user)) => {
            tracing::debug!("Request authenticated as {}", user.username);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => {
            tracing::info!(
                "Unauthenticated request to {}, redirecting to login",
                request.uri().path()
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, users::insert_user};

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(42, false);

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "42");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert!(cookie.max_age().is_none());
        assert!(cookie.expires().is_none());
    }

    #[test]
    fn test_secure_flag_follows_config() {
        assert_eq!(session_cookie(1, true).secure(), Some(true));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(0));
    }

    #[tokio::test]
    async fn test_resolve_session() {
        let pool = open_in_memory().await.unwrap();
        let id = insert_user(&pool, "alice", "hash").await.unwrap();

        let jar = CookieJar::new().add(session_cookie(id, false));
        let user = resolve_session(&pool, &jar).await.unwrap();
        assert_eq!(
            user,
            Some(SessionUser {
                id,
                username: "alice".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_resolve_session_unauthenticated_cases() {
        let pool = open_in_memory().await.unwrap();
        insert_user(&pool, "alice", "hash").await.unwrap();

        let no_cookie = CookieJar::new();
        assert!(resolve_session(&pool, &no_cookie).await.unwrap().is_none());

        let empty = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert!(resolve_session(&pool, &empty).await.unwrap().is_none());

        let garbage = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "alice"));
        assert!(resolve_session(&pool, &garbage).await.unwrap().is_none());

        let unknown = CookieJar::new().add(session_cookie(9999, false));
        assert!(resolve_session(&pool, &unknown).await.unwrap().is_none());
    }
}
