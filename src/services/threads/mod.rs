/*
 * Responsibility
 * - Thread Access Service: 一覧 / 作成 / 取得 / 更新 / 削除
 * - 認証済みユーザーは引数で明示的に受け取る (global state にしない)
 * - HTTP の形 (status / envelope) は知らない。ThreadError で意味だけ返す
 */
pub mod policy;

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::repos::{
    ThreadStore,
    comment_repo::CommentRow,
    error::RepoError,
    thread_repo::{ThreadChanges, ThreadRow, UpdateGuard},
};

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("thread not found")]
    NotFound,
    #[error("edit window has closed")]
    EditWindowClosed,
    #[error("caller is not the thread author")]
    NotAuthor,
    #[error("thread changed before the update was written")]
    UpdateRejected,
    #[error("thread was already gone when deleting")]
    DeleteRejected,

    #[error("failed to list threads")]
    List(#[source] RepoError),
    #[error("failed to load thread")]
    Lookup(#[source] RepoError),
    #[error("failed to create thread")]
    Create(#[source] RepoError),
    #[error("failed to update thread")]
    Update(#[source] RepoError),
    #[error("failed to delete thread")]
    Delete(#[source] RepoError),
}

#[derive(Debug, Clone)]
pub struct ThreadWithComments {
    pub thread: ThreadRow,
    pub comments: Vec<CommentRow>,
}

#[derive(Clone)]
pub struct ThreadService {
    store: Arc<dyn ThreadStore>,
}

impl std::fmt::Debug for ThreadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadService").finish_non_exhaustive()
    }
}

impl ThreadService {
    pub fn new(store: Arc<dyn ThreadStore>) -> Self {
        Self { store }
    }

    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<ThreadWithComments>, ThreadError> {
        let threads = self
            .store
            .list_by_user(user_id)
            .await
            .map_err(ThreadError::List)?;

        let ids: Vec<i64> = threads.iter().map(|t| t.thread_id).collect();
        let comments = self
            .store
            .comments_for(&ids)
            .await
            .map_err(ThreadError::List)?;

        let mut by_thread: HashMap<i64, Vec<CommentRow>> = HashMap::new();
        for c in comments {
            by_thread.entry(c.thread_id).or_default().push(c);
        }

        Ok(threads
            .into_iter()
            .map(|thread| {
                let comments = by_thread.remove(&thread.thread_id).unwrap_or_default();
                ThreadWithComments { thread, comments }
            })
            .collect())
    }

    /// Owner is always the caller; nothing from the payload decides it.
    pub async fn create(&self, user_id: Uuid, title: &str) -> Result<ThreadRow, ThreadError> {
        self.store
            .create(title, user_id)
            .await
            .map_err(ThreadError::Create)
    }

    pub async fn get(&self, thread_id: i64) -> Result<ThreadRow, ThreadError> {
        self.store
            .get(thread_id)
            .await
            .map_err(ThreadError::Lookup)?
            .ok_or(ThreadError::NotFound)
    }

    /// Window is checked before authorship, so an expired thread reports
    /// the window even to non-owners.
    pub async fn update(
        &self,
        user_id: Uuid,
        thread_id: i64,
        changes: &ThreadChanges,
        now: DateTime<Utc>,
    ) -> Result<ThreadRow, ThreadError> {
        let thread = self.get(thread_id).await?;

        if !policy::is_editable(thread.created_at, now) {
            return Err(ThreadError::EditWindowClosed);
        }
        if !policy::is_author(&thread, user_id) {
            return Err(ThreadError::NotAuthor);
        }

        let guard = UpdateGuard {
            thread_id,
            user_id,
            created_after: policy::editable_after(now),
        };

        self.store
            .update(guard, changes)
            .await
            .map_err(ThreadError::Update)?
            .ok_or(ThreadError::UpdateRejected)
    }

    // TODO: restrict delete to the author within the edit window once clients stop relying on open delete
    pub async fn delete(&self, thread_id: i64) -> Result<(), ThreadError> {
        let thread = self.get(thread_id).await?;

        let deleted = self
            .store
            .delete(thread.thread_id)
            .await
            .map_err(ThreadError::Delete)?;

        if !deleted {
            return Err(ThreadError::DeleteRejected);
        }
        Ok(())
    }
}
