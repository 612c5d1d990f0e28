use chrono::Utc;

use super::{is_unique_violation, Db};
use crate::error::{AppError, Result};
use crate::models::User;

/// Insert a new user and return its ID
///
/// A username collision that slips past [`username_exists`] is still caught
/// by the UNIQUE constraint and reported as [`AppError::UsernameTaken`].
pub async fn insert_user(pool: &Db, username: &str, password_hash: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::UsernameTaken
            } else {
                AppError::Database(e)
            }
        })?;

    Ok(result.last_insert_rowid())
}

pub async fn username_exists(pool: &Db, username: &str) -> Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn find_user_by_username(pool: &Db, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_username_by_id(pool: &Db, id: i64) -> Result<Option<String>> {
    let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let pool = open_in_memory().await.unwrap();

        let id = insert_user(&pool, "alice", "hash").await.unwrap();

        let user = find_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "hash");

        assert_eq!(
            find_username_by_id(&pool, id).await.unwrap().as_deref(),
            Some("alice")
        );
        assert!(username_exists(&pool, "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_user() {
        let pool = open_in_memory().await.unwrap();

        assert!(find_user_by_username(&pool, "nobody").await.unwrap().is_none());
        assert!(find_username_by_id(&pool, 42).await.unwrap().is_none());
        assert!(!username_exists(&pool, "nobody").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = open_in_memory().await.unwrap();

        insert_user(&pool, "alice", "hash").await.unwrap();
        let result = insert_user(&pool, "alice", "other").await;

        assert!(matches!(result, Err(AppError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_username_lookup_is_parameter_bound() {
        let pool = open_in_memory().await.unwrap();
        insert_user(&pool, "alice", "hash").await.unwrap();

        let injected = find_user_by_username(&pool, "' OR '1'='1").await.unwrap();
        assert!(injected.is_none());
    }
}
