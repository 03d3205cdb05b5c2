/*
 * Responsibility
 * - Persistence Store の抽象 (ThreadStore)
 * - service はこの trait だけを見る。Postgres 実装は PgThreadStore
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::{
    comment_repo::{self, CommentRow},
    error::RepoError,
    thread_repo::{self, ThreadChanges, ThreadRow, UpdateGuard},
};

#[async_trait]
pub trait ThreadStore: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ThreadRow>, RepoError>;

    async fn comments_for(&self, thread_ids: &[i64]) -> Result<Vec<CommentRow>, RepoError>;

    async fn create(&self, title: &str, user_id: Uuid) -> Result<ThreadRow, RepoError>;

    async fn get(&self, thread_id: i64) -> Result<Option<ThreadRow>, RepoError>;

    // Ok(None) => the row no longer satisfies `guard`
    async fn update(
        &self,
        guard: UpdateGuard,
        changes: &ThreadChanges,
    ) -> Result<Option<ThreadRow>, RepoError>;

    // Removes the thread together with its comments.
    async fn delete(&self, thread_id: i64) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgThreadStore {
    db: PgPool,
}

impl PgThreadStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ThreadStore for PgThreadStore {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ThreadRow>, RepoError> {
        thread_repo::list_by_user(&self.db, user_id).await
    }

    async fn comments_for(&self, thread_ids: &[i64]) -> Result<Vec<CommentRow>, RepoError> {
        comment_repo::list_by_threads(&self.db, thread_ids).await
    }

    async fn create(&self, title: &str, user_id: Uuid) -> Result<ThreadRow, RepoError> {
        thread_repo::create(&self.db, title, user_id).await
    }

    async fn get(&self, thread_id: i64) -> Result<Option<ThreadRow>, RepoError> {
        thread_repo::get(&self.db, thread_id).await
    }

    async fn update(
        &self,
        guard: UpdateGuard,
        changes: &ThreadChanges,
    ) -> Result<Option<ThreadRow>, RepoError> {
        thread_repo::update(&self.db, guard, changes).await
    }

    async fn delete(&self, thread_id: i64) -> Result<bool, RepoError> {
        // comments go with it via ON DELETE CASCADE
        thread_repo::delete(&self.db, thread_id).await
    }
}
