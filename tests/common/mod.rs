//! Common test utilities and fixtures.

#![cfg(feature = "server")]
#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;
use persona_quiz::server::{
    AppState, Config, CorsConfig, LoggingConfig, ServerConfig, StoreConfig, router,
};

// =============================================================================
// Answer Sets
// =============================================================================

/// Three votes for lion, one for cat.
pub const LION_MAJORITY: &[&str] = &["lion", "cat", "lion", "lion"];

/// Tied two-two, cat voted first.
pub const CAT_FIRST_TIE: &[&str] = &["cat", "turtle", "turtle", "cat"];

/// Majority for engineering.
pub const ENGINEERING_MAJORITY: &[&str] = &[
    "engineering",
    "science",
    "engineering",
    "arts",
    "engineering",
];

// =============================================================================
// Test Application
// =============================================================================

/// Test application wrapper with a temporary history store.
pub struct TestApp {
    pub server: TestServer,
    pub store_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive for test duration
}

impl TestApp {
    /// Create a new test application with a fresh fjall store.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let store_path = temp_dir.path().join("history");
        let config = Config {
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 0,
            },
            store: StoreConfig {
                path: store_path.to_string_lossy().into(),
            },
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        };
        let state = AppState::from_config(&config)?;
        let server = TestServer::new(router(state))?;
        Ok(Self {
            server,
            store_path,
            _temp_dir: temp_dir,
        })
    }

    /// Submit answers for a quiz and return the response body.
    pub async fn submit(&self, identifier: &str, answers: &[&str], time_taken: f64) -> Value {
        let response = self
            .server
            .post(&format!("/api/v1/quizzes/{}/result", identifier))
            .json(&json!({ "answers": answers, "time_taken": time_taken }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// History list as JSON records.
    pub async fn history(&self) -> Vec<Value> {
        let response = self.server.get("/api/v1/history").await;
        response.assert_status_ok();
        response.json()
    }
}

/// Quiz identifiers of `records`, in order.
pub fn identifiers(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r["quizIdentifier"].as_str().map(String::from))
        .collect()
}
