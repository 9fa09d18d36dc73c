mod common;

use axum::http::StatusCode;
use common::{record, TestApp};
use chrono::{DateTime, TimeZone, Utc};
use secrecy::Secret;
use serde_json::{json, Value};
use serenity_service::config::DatabaseConfig;
use serenity_service::services::{
    AffirmationStore, MockAffirmationStore, MockCompletionProvider, PgAffirmationStore,
};
use sqlx::{Connection, PgConnection};
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
async fn affirm_returns_rows_as_list() {
    let app = TestApp::new(
        MockAffirmationStore::with_rows(vec![record(7, "I am enough.", "self-worth")]),
        MockCompletionProvider::echo(),
    );

    let (status, body) = app.get("/affirm").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "affirmations": [{ "id": 7, "text": "I am enough.", "tag": "self-worth" }] })
    );
    assert_eq!(app.store.calls(), 1);
}

#[tokio::test]
async fn affirm_with_empty_table_returns_empty_list() {
    let app = TestApp::new(
        MockAffirmationStore::with_rows(vec![]),
        MockCompletionProvider::echo(),
    );

    let (status, body) = app.get("/affirm").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "affirmations": [] }));
}

#[tokio::test]
async fn affirm_store_failure_is_database_error() {
    let app = TestApp::new(
        MockAffirmationStore::failing("login failed for user"),
        MockCompletionProvider::echo(),
    );

    let (status, body) = app.get("/affirm").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error: login failed for user" }));
}

#[tokio::test]
async fn affirm_never_touches_completion_gateway() {
    let app = TestApp::new(
        MockAffirmationStore::with_rows(vec![]),
        MockCompletionProvider::echo(),
    );

    app.get("/affirm").await;

    assert!(app.provider.calls().is_empty());
}

/// A throwaway schema with its own `affirmations` table, on the database
/// named by TEST_DATABASE_URL. The store reaches it through `search_path`.
struct TestSchema {
    admin: PgConnection,
    name: String,
    url: String,
}

impl TestSchema {
    async fn create() -> Option<Self> {
        let Ok(base_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("Skipping test: TEST_DATABASE_URL is not set");
            return None;
        };

        let name = format!("affirm_{}", Uuid::new_v4().simple());
        let mut admin = PgConnection::connect(&base_url)
            .await
            .expect("Failed to connect to Postgres");

        let statements = [
            format!("CREATE SCHEMA {name}"),
            format!("CREATE TYPE {name}.tag_kind AS ENUM ('calm', 'courage', 'self-worth')"),
            format!(
                "CREATE TABLE {name}.affirmations (
                    id SERIAL PRIMARY KEY,
                    text TEXT NOT NULL,
                    tag {name}.tag_kind,
                    weight NUMERIC(4, 2),
                    created_at TIMESTAMPTZ,
                    note TEXT
                )"
            ),
        ];
        for statement in &statements {
            sqlx::query(statement)
                .execute(&mut admin)
                .await
                .expect("Failed to prepare schema");
        }

        let separator = if base_url.contains('?') { '&' } else { '?' };
        let url = format!("{base_url}{separator}options=-c%20search_path%3D{name}");

        Some(Self { admin, name, url })
    }

    async fn insert(&mut self, text: &str, tag: &str) {
        sqlx::query(&format!(
            "INSERT INTO {}.affirmations (text, tag, weight, created_at, note)
             VALUES ($1, $2::{}.tag_kind, 4.50, '2024-05-01T08:30:00Z', NULL)",
            self.name, self.name
        ))
        .bind(text)
        .bind(tag)
        .execute(&mut self.admin)
        .await
        .expect("Failed to insert affirmation");
    }

    fn store(&self) -> PgAffirmationStore {
        PgAffirmationStore::new(&DatabaseConfig {
            url: Secret::new(self.url.clone()),
            connect_timeout: Duration::from_secs(30),
        })
    }

    async fn teardown(mut self) {
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.name))
            .execute(&mut self.admin)
            .await
            .expect("Failed to drop schema");
        let _ = self.admin.close().await;
    }
}

#[tokio::test]
async fn postgres_row_maps_every_column_type() {
    let Some(mut schema) = TestSchema::create().await else {
        return;
    };
    schema.insert("I am enough.", "self-worth").await;

    let mut rows = schema
        .store()
        .fetch_random_affirmation()
        .await
        .expect("Failed to fetch affirmation");
    schema.teardown().await;

    assert_eq!(rows.len(), 1);
    let mut row = rows.remove(0);

    let created_at = row
        .remove("created_at")
        .and_then(|v| v.as_str().map(str::to_string))
        .expect("created_at should be a string");
    assert_eq!(
        DateTime::parse_from_rfc3339(&created_at).unwrap().with_timezone(&Utc),
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    );

    assert_eq!(
        Value::Object(row),
        json!({
            "id": 1,
            "text": "I am enough.",
            "tag": "self-worth",
            "weight": 4.5,
            "note": null
        })
    );
}

#[tokio::test]
async fn postgres_store_returns_one_of_many_rows() {
    let Some(mut schema) = TestSchema::create().await else {
        return;
    };
    for (text, tag) in [("I can rest.", "calm"), ("I am brave.", "courage"), ("I matter.", "self-worth")] {
        schema.insert(text, tag).await;
    }

    let rows = schema
        .store()
        .fetch_random_affirmation()
        .await
        .expect("Failed to fetch affirmation");
    schema.teardown().await;

    assert_eq!(rows.len(), 1);
    let text = rows[0]["text"].as_str().unwrap();
    assert!(["I can rest.", "I am brave.", "I matter."].contains(&text));
}

#[tokio::test]
async fn postgres_empty_table_returns_no_rows() {
    let Some(schema) = TestSchema::create().await else {
        return;
    };

    let rows = schema
        .store()
        .fetch_random_affirmation()
        .await
        .expect("Failed to fetch affirmation");
    schema.teardown().await;

    assert!(rows.is_empty());
}
