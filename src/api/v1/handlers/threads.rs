/*
 * Responsibility
 * - /threads 系 CRUD handler
 * - Path の thread_id は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 * - 認証済みユーザーは AuthCtx から取り出し、service に引数で渡す
 * - ThreadError → status / envelope の対応はここだけで決める
 *
 * Response shape (既存クライアント互換のため意図的に揃えていない)
 * - show は envelope なしの thread そのもの
 * - 業務ルール違反 (編集期間切れ / 作成者以外) は 500
 * - update 成功は 204 + JSON body
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    api::v1::{
        dto::threads::{
            CommentResponse, CreateThreadRequest, MessageEnvelope, ThreadEnvelope,
            ThreadResponse, ThreadWithCommentsResponse, UpdateThreadRequest,
        },
        extractors::{AuthCtxExtractor, PublicIdResource, PublicThreadId, ThreadTag},
    },
    error::AppError,
    repos::{comment_repo::CommentRow, thread_repo::ThreadChanges, thread_repo::ThreadRow},
    services::{
        id_codec::IdCodec,
        threads::{ThreadError, ThreadWithComments},
    },
    state::AppState,
};

/// `public_id` is `None` for the collection routes (list / create).
fn thread_failure(err: ThreadError, public_id: Option<&str>) -> AppError {
    let internal = StatusCode::INTERNAL_SERVER_ERROR;
    match err {
        ThreadError::NotFound => ThreadTag::not_found(public_id.unwrap_or_default()),
        ThreadError::EditWindowClosed => {
            AppError::envelope(internal, "Sorry, thread cannot be edited 6h after creation")
        }
        ThreadError::NotAuthor => AppError::envelope(
            internal,
            "Only user who created the thread can make updates",
        ),
        ThreadError::UpdateRejected => {
            tracing::warn!(thread_id = public_id, "thread changed between check and update");
            AppError::envelope(internal, "Sorry, thread could not be updated")
        }
        ThreadError::DeleteRejected => {
            tracing::warn!(thread_id = public_id, "thread vanished before delete");
            AppError::envelope(internal, "Thread could not be deleted")
        }
        ThreadError::Update(ref source) => {
            tracing::error!(error = ?source, thread_id = public_id, "{err}");
            AppError::envelope(internal, "Sorry, thread could not be updated")
        }
        ThreadError::Delete(ref source) => {
            tracing::error!(error = ?source, thread_id = public_id, "{err}");
            AppError::envelope(internal, "Thread could not be deleted")
        }
        ThreadError::Create(ref source) => {
            tracing::error!(error = ?source, "{err}");
            AppError::envelope(internal, "Sorry, thread could not be added")
        }
        ThreadError::Lookup(ref source) | ThreadError::List(ref source) => {
            tracing::error!(error = ?source, thread_id = public_id, "{err}");
            AppError::envelope(internal, "Sorry, thread could not be loaded")
        }
    }
}

fn thread_to_response(codec: &IdCodec, row: ThreadRow) -> Result<ThreadResponse, AppError> {
    Ok(ThreadResponse {
        id: codec.encode(row.thread_id)?,
        title: row.title,
        user_id: row.user_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn comment_to_response(codec: &IdCodec, row: CommentRow) -> Result<CommentResponse, AppError> {
    Ok(CommentResponse {
        id: codec.encode(row.comment_id)?,
        thread_id: codec.encode(row.thread_id)?,
        user_id: row.user_id,
        body: row.body,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn with_comments_to_response(
    codec: &IdCodec,
    item: ThreadWithComments,
) -> Result<ThreadWithCommentsResponse, AppError> {
    let comments = item
        .comments
        .into_iter()
        .map(|c| comment_to_response(codec, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ThreadWithCommentsResponse {
        thread: thread_to_response(codec, item.thread)?,
        comments,
    })
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::bad_request("INVALID_BODY", rejection.body_text())
}

pub async fn list_threads(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<ThreadWithCommentsResponse>>, AppError> {
    let items = state
        .threads
        .list_mine(ctx.user_id)
        .await
        .map_err(|e| thread_failure(e, None))?;

    let res = items
        .into_iter()
        .map(|item| with_comments_to_response(&state.id_codec, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(res))
}

pub async fn create_thread(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<CreateThreadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ThreadEnvelope>), AppError> {
    let Json(req) = payload.map_err(invalid_body)?;
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_FAILED", msg))?;

    let row = state
        .threads
        .create(ctx.user_id, req.title.trim())
        .await
        .map_err(|e| thread_failure(e, None))?;

    tracing::info!(thread_id = row.thread_id, user_id = %ctx.user_id, "thread created");

    let thread = thread_to_response(&state.id_codec, row)?;
    Ok((StatusCode::OK, Json(ThreadEnvelope::success(thread))))
}

pub async fn get_thread(
    State(state): State<AppState>,
    thread_id: PublicThreadId,
) -> Result<Json<ThreadResponse>, AppError> {
    let row = state
        .threads
        .get(thread_id.id)
        .await
        .map_err(|e| thread_failure(e, Some(&thread_id.raw)))?;

    Ok(Json(thread_to_response(&state.id_codec, row)?))
}

pub async fn update_thread(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    thread_id: PublicThreadId,
    payload: Result<Json<UpdateThreadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageEnvelope>), AppError> {
    let Json(req) = payload.map_err(invalid_body)?;
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_FAILED", msg))?;

    let changes = ThreadChanges {
        title: req.title.map(|t| t.trim().to_string()),
    };

    state
        .threads
        .update(ctx.user_id, thread_id.id, &changes, Utc::now())
        .await
        .map_err(|e| thread_failure(e, Some(&thread_id.raw)))?;

    tracing::info!(thread_id = thread_id.id, user_id = %ctx.user_id, "thread updated");

    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageEnvelope::success("Thread successfully updated")),
    ))
}

pub async fn delete_thread(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    thread_id: PublicThreadId,
) -> Result<Json<MessageEnvelope>, AppError> {
    state
        .threads
        .delete(thread_id.id)
        .await
        .map_err(|e| thread_failure(e, Some(&thread_id.raw)))?;

    tracing::info!(thread_id = thread_id.id, user_id = %ctx.user_id, "thread deleted");

    Ok(Json(MessageEnvelope::success("Thread is deleted.")))
}
