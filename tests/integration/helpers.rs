//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tower::ServiceExt;

use trainhub_api::{AppState, build_app};
use trainhub_core::config::AppConfig;
use trainhub_database::DocumentStore;
use trainhub_database::memory::MemoryDocumentStore;
use trainhub_service::ProjectService;
use trainhub_storage::LocalStorageProvider;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store for direct inspection
    pub store: MemoryDocumentStore,
    /// Private files root
    pub dir: tempfile::TempDir,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with project `P1` registered.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application from a config. The store is always the
    /// in-memory one and storage is rooted in a fresh temp directory.
    pub async fn with_config(mut config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        config.database.provider = "memory".to_string();
        config.storage.private_root = dir.path().to_string_lossy().into_owned();

        let storage = LocalStorageProvider::new(&config.storage.private_root)
            .await
            .expect("Failed to init storage");
        let store = MemoryDocumentStore::new();

        ProjectService::new(Arc::new(store.clone()))
            .create_project("P1", None)
            .await
            .expect("Failed to create project");

        let state = AppState::new(config.clone(), Arc::new(store.clone()), Arc::new(storage));
        let router = build_app(state);

        Self {
            router,
            store,
            dir,
            config,
        }
    }

    /// Directory of one label under a project.
    pub fn label_dir(&self, project: &str, label: &str) -> PathBuf {
        self.dir
            .path()
            .join("Home/training_data")
            .join(project)
            .join(label)
    }

    /// Number of regular files in a directory (0 if it does not exist).
    pub fn count_files(&self, dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| entries.filter(|e| e.is_ok()).count())
            .unwrap_or(0)
    }

    /// Number of committed file records for a project.
    pub async fn record_count(&self, project: &str) -> usize {
        self.store
            .list_files(project)
            .await
            .expect("Failed to list files")
            .len()
    }

    /// POST a JSON body to the upload method.
    pub async fn upload(&self, body: Value) -> TestResponse {
        self.request("POST", "/api/method/upload_training_data", Some(body))
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Base64 of `bytes`, optionally with a PNG data-URL prefix.
pub fn encode(bytes: &[u8], data_url: bool) -> String {
    let encoded = STANDARD.encode(bytes);
    if data_url {
        format!("data:image/png;base64,{encoded}")
    } else {
        encoded
    }
}
