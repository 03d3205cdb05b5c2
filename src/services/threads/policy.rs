/*
 * Responsibility
 * - thread の編集可否ルール (編集可能期間 / 作成者チェック)
 * - 時刻は引数で受け取る (テストで境界を固定できるように)
 */
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::repos::thread_repo::ThreadRow;

pub const EDIT_WINDOW_HOURS: i64 = 6;

pub fn edit_window() -> TimeDelta {
    TimeDelta::hours(EDIT_WINDOW_HOURS)
}

/// Editable while `now - created_at < 6h`. Exactly 6h is already closed.
pub fn is_editable(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - created_at < edit_window()
}

/// Oldest creation instant (exclusive) that is still editable at `now`.
pub fn editable_after(now: DateTime<Utc>) -> DateTime<Utc> {
    now - edit_window()
}

pub fn is_author(thread: &ThreadRow, user_id: Uuid) -> bool {
    thread.user_id == user_id
}
