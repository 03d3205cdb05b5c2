/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - threads: ThreadService (ThreadStore を内包), id_codec: IdCodec, auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::AuthService, id_codec::IdCodec, threads::ThreadService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub threads: ThreadService,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(threads: ThreadService, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self {
            threads,
            id_codec,
            auth,
        }
    }
}
