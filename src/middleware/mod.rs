/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer 検証 (v1 のみ) / http, cors, security_headers: Router 全体
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
