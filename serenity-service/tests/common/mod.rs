#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use serenity_service::models::AffirmationRecord;
use serenity_service::services::{MockAffirmationStore, MockCompletionProvider};
use serenity_service::{build_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MockAffirmationStore>,
    pub provider: Arc<MockCompletionProvider>,
}

impl TestApp {
    pub fn new(store: MockAffirmationStore, provider: MockCompletionProvider) -> Self {
        let store = Arc::new(store);
        let provider = Arc::new(provider);
        let state = AppState::new(store.clone(), provider.clone());

        Self {
            router: build_router(state),
            store,
            provider,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_chat(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn record(id: i64, text: &str, tag: &str) -> AffirmationRecord {
    let mut record = AffirmationRecord::new();
    record.insert("id".to_string(), Value::from(id));
    record.insert("text".to_string(), Value::from(text));
    record.insert("tag".to_string(), Value::from(tag));
    record
}
