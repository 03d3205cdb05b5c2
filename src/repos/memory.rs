//! In-memory `ThreadStore` for tests.
//!
//! Mirrors the Postgres behavior that handlers and services rely on:
//! store-generated ids and timestamps, the update guard, and comment cascade on delete.

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::repos::{
    comment_repo::CommentRow,
    error::RepoError,
    store::ThreadStore,
    thread_repo::{ThreadChanges, ThreadRow, UpdateGuard},
};

#[derive(Default)]
struct Inner {
    threads: BTreeMap<i64, ThreadRow>,
    comments: BTreeMap<i64, CommentRow>,
    next_id: i64,
    fail_writes: bool,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_writable(&self) -> Result<(), RepoError> {
        if self.fail_writes {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryThreadStore {
    inner: Mutex<Inner>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent write fails with a db error until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn seed_thread(&self, title: &str, user_id: Uuid, created_at: DateTime<Utc>) -> ThreadRow {
        let mut inner = self.inner.lock().unwrap();
        let row = ThreadRow {
            thread_id: inner.next_id(),
            title: title.to_string(),
            user_id,
            created_at,
            updated_at: created_at,
        };
        inner.threads.insert(row.thread_id, row.clone());
        row
    }

    pub fn seed_comment(&self, thread_id: i64, user_id: Uuid, body: &str) -> CommentRow {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let row = CommentRow {
            comment_id: inner.next_id(),
            thread_id,
            user_id,
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.comments.insert(row.comment_id, row.clone());
        row
    }

    pub fn thread(&self, thread_id: i64) -> Option<ThreadRow> {
        self.inner.lock().unwrap().threads.get(&thread_id).cloned()
    }

    /// Moves `createdAt` into the past, as if `by` had elapsed since creation.
    pub fn backdate(&self, thread_id: i64, by: TimeDelta) {
        if let Some(row) = self.inner.lock().unwrap().threads.get_mut(&thread_id) {
            row.created_at -= by;
        }
    }

    pub fn thread_count(&self) -> usize {
        self.inner.lock().unwrap().threads.len()
    }

    pub fn comment_count(&self) -> usize {
        self.inner.lock().unwrap().comments.len()
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ThreadRow>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .threads
            .values()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn comments_for(&self, thread_ids: &[i64]) -> Result<Vec<CommentRow>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .comments
            .values()
            .filter(|c| thread_ids.contains(&c.thread_id))
            .cloned()
            .collect())
    }

    async fn create(&self, title: &str, user_id: Uuid) -> Result<ThreadRow, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_writable()?;

        let now = Utc::now();
        let row = ThreadRow {
            thread_id: inner.next_id(),
            title: title.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        inner.threads.insert(row.thread_id, row.clone());
        Ok(row)
    }

    async fn get(&self, thread_id: i64) -> Result<Option<ThreadRow>, RepoError> {
        Ok(self.thread(thread_id))
    }

    async fn update(
        &self,
        guard: UpdateGuard,
        changes: &ThreadChanges,
    ) -> Result<Option<ThreadRow>, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_writable()?;

        let Some(row) = inner.threads.get_mut(&guard.thread_id) else {
            return Ok(None);
        };
        if row.user_id != guard.user_id || row.created_at <= guard.created_after {
            return Ok(None);
        }

        if let Some(title) = &changes.title {
            row.title = title.clone();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, thread_id: i64) -> Result<bool, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_writable()?;

        let removed = inner.threads.remove(&thread_id).is_some();
        if removed {
            inner.comments.retain(|_, c| c.thread_id != thread_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename() -> ThreadChanges {
        ThreadChanges {
            title: Some("Hi".into()),
        }
    }

    #[tokio::test]
    async fn guarded_update_skips_other_owner() {
        let store = MemoryThreadStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let thread = store.seed_thread("Hello", owner, now);

        let guard = UpdateGuard {
            thread_id: thread.thread_id,
            user_id: Uuid::new_v4(),
            created_after: now - TimeDelta::hours(6),
        };

        assert!(store.update(guard, &rename()).await.unwrap().is_none());
        assert_eq!(store.thread(thread.thread_id).unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn guarded_update_skips_rows_created_at_or_before_cutoff() {
        let store = MemoryThreadStore::new();
        let owner = Uuid::new_v4();
        let created_at = Utc::now() - TimeDelta::hours(6);
        let thread = store.seed_thread("Hello", owner, created_at);

        let guard = UpdateGuard {
            thread_id: thread.thread_id,
            user_id: owner,
            created_after: created_at,
        };

        assert!(store.update(guard, &rename()).await.unwrap().is_none());
        assert_eq!(store.thread(thread.thread_id).unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn guarded_update_writes_when_guard_holds() {
        let store = MemoryThreadStore::new();
        let owner = Uuid::new_v4();
        let created_at = Utc::now();
        let thread = store.seed_thread("Hello", owner, created_at);

        let guard = UpdateGuard {
            thread_id: thread.thread_id,
            user_id: owner,
            created_after: created_at - TimeDelta::seconds(1),
        };

        let updated = store.update(guard, &rename()).await.unwrap().unwrap();
        assert_eq!(updated.title, "Hi");
    }
}
