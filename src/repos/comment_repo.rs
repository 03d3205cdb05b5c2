/*
 * Responsibility
 * - comments テーブル向け SQLx 操作 (read-only)
 * - thread 一覧にまとめて載せるため、threadId の集合で一括取得する
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: i64,

    #[sqlx(rename = "threadId")]
    pub thread_id: i64,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    pub body: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list_by_threads(
    db: &PgPool,
    thread_ids: &[i64],
) -> Result<Vec<CommentRow>, RepoError> {
    if thread_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT
            "commentId", "threadId", "userId", body, "createdAt", "updatedAt"
        FROM comments
        WHERE "threadId" = ANY($1)
        ORDER BY "commentId" ASC
        "#,
    )
    .bind(thread_ids)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
