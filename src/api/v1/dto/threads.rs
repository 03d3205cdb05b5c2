/*
 * Responsibility
 * - Threads の request/response DTO と envelope
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - request の user_id は受け取らない (owner は常に認証済みユーザー)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 255;

fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("title is required");
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err("title must be <= 255 chars");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
}

impl CreateThreadRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_title(&self.title)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateThreadRequest {
    pub title: Option<String>,
}

impl UpdateThreadRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub id: String, // encoded
    pub title: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,        // encoded
    pub thread_id: String, // encoded
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ThreadWithCommentsResponse {
    #[serde(flatten)]
    pub thread: ThreadResponse,
    pub comments: Vec<CommentResponse>,
}

/// `{success:true, thread}`
#[derive(Debug, Serialize)]
pub struct ThreadEnvelope {
    pub success: bool,
    pub thread: ThreadResponse,
}

impl ThreadEnvelope {
    pub fn success(thread: ThreadResponse) -> Self {
        Self {
            success: true,
            thread,
        }
    }
}

/// `{success, message}`
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

impl MessageEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
