/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /threads 以下はすべて Bearer 必須 (access middleware を route 単位で掛ける)
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::threads::{
    create_thread, delete_thread, get_thread, list_threads, update_thread,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let threads = Router::new()
        .route("/threads", get(list_threads).post(create_thread))
        .route(
            "/threads/{thread_id}",
            get(get_thread)
                .put(update_thread)
                .patch(update_thread)
                .delete(delete_thread),
        );

    access::apply(threads, state)
}
