//! Router-level test harness: the real router and middleware over an in-memory store.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    app::build_router,
    config::{AppEnv, Config},
    repos::memory::MemoryThreadStore,
    services::{
        auth::{AccessKey, AuthService},
        id_codec::IdCodec,
        threads::ThreadService,
    },
    state::AppState,
};

const SECRET: &str = "router-test-secret";
const ISSUER: &str = "https://auth.test";
const AUDIENCE: &str = "thread-api";

fn config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        database_url: "postgres://unused".into(),
        database_max_connections: 1,
        run_migrations: false,
        cors_allowed_origins: Vec::new(),
        request_body_limit_bytes: 64 * 1024,
        request_timeout: Duration::from_secs(5),
        sqids_min_length: 10,
        sqids_alphabet: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".into(),
        auth_issuer: ISSUER.into(),
        auth_audience: AUDIENCE.into(),
        access_token_leeway_seconds: 0,
        access_key: AccessKey::Secret(SECRET.into()),
    }
}

fn token_for(user_id: Uuid) -> String {
    let claims = json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": user_id.to_string(),
        "exp": chrono::Utc::now().timestamp() + 600,
        "jti": Uuid::new_v4().to_string(),
    });
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub struct TestApp {
    pub store: Arc<MemoryThreadStore>,
    codec: IdCodec,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = config();
        let store = Arc::new(MemoryThreadStore::new());
        let codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap();
        let auth = AuthService::new(
            &config.access_key,
            &config.auth_issuer,
            &config.auth_audience,
            config.access_token_leeway_seconds,
        )
        .unwrap();

        let state = AppState::new(
            ThreadService::new(store.clone()),
            codec.clone(),
            Arc::new(auth),
        );
        let router = build_router(state, &config);

        Self {
            store,
            codec,
            router,
        }
    }

    pub fn encode(&self, id: i64) -> String {
        self.codec.encode(id).unwrap()
    }

    pub fn decode(&self, public_id: &str) -> i64 {
        self.codec.decode(public_id).unwrap()
    }

    /// Sends a JSON request as `user` (no `Authorization` header when `None`).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = user.map(token_for);
        self.dispatch(method, uri, token.as_deref(), body).await
    }

    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.dispatch(method, uri, Some(token), body).await
    }

    pub async fn raw(&self, req: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    async fn dispatch(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let res = self.raw(req).await;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
