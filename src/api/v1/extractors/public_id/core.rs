/*
 * Responsibility
 *  - Path の String を公開 ID として受け、復号して内部 ID に変換する
 *  - 受け取った文字列そのもの (raw) も保持する (404 メッセージにそのまま載せるため)
 *  - Axum の FromRequestParts 実装
 *  - 復号できない文字列は「存在しない ID」として扱い、リソース側の not_found に委ねる
 *
 * 置かないもの
 *  - Thread / Comment といった具体リソース名 (types.rs 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::services::id_codec::IdCodecError;
use crate::state::AppState;

/// 公開 ID が指すリソースの種類。見つからなかった時の応答はリソースごとに決める
pub trait PublicIdResource {
    fn not_found(raw: &str) -> AppError;
}

pub struct PublicId<T> {
    pub id: i64,
    pub raw: String,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64, raw: String) -> Self {
        Self {
            id,
            raw,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: PublicIdResource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_PUBLIC_ID", "invalid id"))?;
        let id = match state.id_codec.decode(&raw) {
            Ok(id) => id,
            Err(IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange) => {
                tracing::debug!(public_id = %raw, "public id does not decode");
                return Err(T::not_found(&raw));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::new(id, raw))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId")
            .field("id", &self.id)
            .field("raw", &self.raw)
            .finish()
    }
}
