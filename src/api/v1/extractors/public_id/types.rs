/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - 見つからない時の応答 (status / message) もここで決める
 *
 * 以下に pub で列挙するものは ./mod.rs 経由で全て公開されるため注意
 */
use axum::http::StatusCode;

use super::core::{PublicId, PublicIdResource};
use crate::error::AppError;

// threads
pub enum ThreadTag {}
pub type PublicThreadId = PublicId<ThreadTag>;

impl PublicIdResource for ThreadTag {
    fn not_found(raw: &str) -> AppError {
        AppError::envelope(
            StatusCode::NOT_FOUND,
            format!("Sorry, thread with id {raw} cannot be found"),
        )
    }
}
