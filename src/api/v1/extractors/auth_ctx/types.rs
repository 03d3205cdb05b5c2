/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - access middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 * - service には user_id を引数で明示的に渡す (リクエストを跨ぐ global な current user は持たない)
 */

use uuid::Uuid;

use crate::services::auth::access_jwt::VerifiedAccessToken;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の `sub` (UUID)。thread の owner 判定に使う
/// - `scopes` / `roles` は coarse-grained な権限情報 (ログ相関用)
/// - `jti` は監査/相関用
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub scopes: Vec<String>,
    pub roles: Vec<String>,
    pub jti: Option<String>,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            user_id: token.user_id,
            scopes: token
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            roles: token.roles.unwrap_or_default(),
            jti: token.jti,
        }
    }
}
