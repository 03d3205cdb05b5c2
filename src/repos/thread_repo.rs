/*
 * Responsibility
 * - threads テーブル向け SQLx 操作
 * - comments は threadId の FK (ON DELETE CASCADE) 前提で削除挙動を意識
 * - update は owner / 編集可能期間を WHERE 句で再確認する (check と write の間の race 対策)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThreadRow {
    #[sqlx(rename = "threadId")]
    pub thread_id: i64,

    pub title: String,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Conditions the row must still satisfy at write time.
#[derive(Debug, Clone, Copy)]
pub struct UpdateGuard {
    pub thread_id: i64,
    pub user_id: Uuid,
    /// The row is only written while `createdAt` is strictly after this instant.
    pub created_after: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ThreadChanges {
    pub title: Option<String>,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<ThreadRow>, RepoError> {
    let rows = sqlx::query_as::<_, ThreadRow>(
        r#"
        SELECT
            "threadId", title, "userId", "createdAt", "updatedAt"
        FROM threads
        WHERE "userId" = $1
        ORDER BY "threadId" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, title: &str, user_id: Uuid) -> Result<ThreadRow, RepoError> {
    let row = sqlx::query_as::<_, ThreadRow>(
        r#"
        INSERT INTO threads (title, "userId")
        VALUES ($1, $2)
        RETURNING
            "threadId", title, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, thread_id: i64) -> Result<Option<ThreadRow>, RepoError> {
    let row = sqlx::query_as::<_, ThreadRow>(
        r#"
        SELECT
            "threadId", title, "userId", "createdAt", "updatedAt"
        FROM threads
        WHERE "threadId" = $1
        "#,
    )
    .bind(thread_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Returns `None` when no row matched the guard (deleted, or no longer editable).
pub async fn update(
    db: &PgPool,
    guard: UpdateGuard,
    changes: &ThreadChanges,
) -> Result<Option<ThreadRow>, RepoError> {
    let row = sqlx::query_as::<_, ThreadRow>(
        r#"
        UPDATE threads
        SET
            title = COALESCE($4, title),
            "updatedAt" = now()
        WHERE "threadId" = $1
          AND "userId" = $2
          AND "createdAt" > $3
        RETURNING
            "threadId", title, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(guard.thread_id)
    .bind(guard.user_id)
    .bind(guard.created_after)
    .bind(changes.title.as_deref())
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, thread_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM threads
        WHERE "threadId" = $1
        "#,
    )
    .bind(thread_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
