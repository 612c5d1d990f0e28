use chrono::Utc;

use super::Db;
use crate::error::Result;
use crate::models::Todo;

/// All tasks owned by `user_id`, oldest first
pub async fn list_todos_for_user(pool: &Db, user_id: i64) -> Result<Vec<Todo>> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, user_id, title, completed, created_at FROM todos WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// Insert an incomplete task; returns the number of rows written
pub async fn insert_todo(pool: &Db, user_id: i64, title: &str) -> Result<u64> {
    let result =
        sqlx::query("INSERT INTO todos (user_id, title, completed, created_at) VALUES (?, ?, ?, ?)")
            .bind(user_id)
            .bind(title)
            .bind(false)
            .bind(Utc::now())
            .execute(pool)
            .await?;

    Ok(result.rows_affected())
}

/// The owning user of a task, or `None` if the task does not exist
pub async fn find_todo_owner(pool: &Db, todo_id: i64) -> Result<Option<i64>> {
    let owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM todos WHERE id = ?")
        .bind(todo_id)
        .fetch_optional(pool)
        .await?;

    Ok(owner)
}

/// Update title and status, only if `user_id` owns the task
pub async fn update_todo(
    pool: &Db,
    todo_id: i64,
    user_id: i64,
    title: &str,
    completed: bool,
) -> Result<u64> {
    let result =
        sqlx::query("UPDATE todos SET title = ?, completed = ? WHERE id = ? AND user_id = ?")
            .bind(title)
            .bind(completed)
            .bind(todo_id)
            .bind(user_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected())
}

/// Delete a task, only if `user_id` owns it; returns rows removed
pub async fn delete_todo(pool: &Db, todo_id: i64, user_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(todo_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, users::insert_user};

    async fn setup() -> (Db, i64, i64) {
        let pool = open_in_memory().await.unwrap();
        let alice = insert_user(&pool, "alice", "hash").await.unwrap();
        let bob = insert_user(&pool, "bob", "hash").await.unwrap();
        (pool, alice, bob)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (pool, alice, bob) = setup().await;

        assert_eq!(insert_todo(&pool, alice, "Buy milk").await.unwrap(), 1);
        assert_eq!(insert_todo(&pool, alice, "Walk dog").await.unwrap(), 1);
        assert_eq!(insert_todo(&pool, bob, "Fix bike").await.unwrap(), 1);

        let todos = list_todos_for_user(&pool, alice).await.unwrap();
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Walk dog"]);
        assert!(todos.iter().all(|t| !t.completed && t.user_id == alice));
    }

    #[tokio::test]
    async fn test_update_scoped_to_owner() {
        let (pool, alice, bob) = setup().await;
        insert_todo(&pool, alice, "Buy milk").await.unwrap();
        let id = list_todos_for_user(&pool, alice).await.unwrap()[0].id;

        assert_eq!(find_todo_owner(&pool, id).await.unwrap(), Some(alice));

        // Bob cannot touch it
        assert_eq!(update_todo(&pool, id, bob, "Hijacked", true).await.unwrap(), 0);
        let todo = &list_todos_for_user(&pool, alice).await.unwrap()[0];
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);

        // Alice can
        assert_eq!(update_todo(&pool, id, alice, "Buy oat milk", true).await.unwrap(), 1);
        let todo = &list_todos_for_user(&pool, alice).await.unwrap()[0];
        assert_eq!(todo.title, "Buy oat milk");
        assert!(todo.completed);
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let (pool, alice, bob) = setup().await;
        insert_todo(&pool, alice, "Buy milk").await.unwrap();
        let id = list_todos_for_user(&pool, alice).await.unwrap()[0].id;

        assert_eq!(delete_todo(&pool, id, bob).await.unwrap(), 0);
        assert_eq!(list_todos_for_user(&pool, alice).await.unwrap().len(), 1);

        assert_eq!(delete_todo(&pool, id, alice).await.unwrap(), 1);
        assert!(list_todos_for_user(&pool, alice).await.unwrap().is_empty());

        // Deleting again is a no-op
        assert_eq!(delete_todo(&pool, id, alice).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_owner_of_missing_task() {
        let (pool, _, _) = setup().await;
        assert_eq!(find_todo_owner(&pool, 12345).await.unwrap(), None);
    }
}
