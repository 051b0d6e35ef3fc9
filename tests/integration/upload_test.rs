//! Integration tests for the training-data upload method.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use trainhub_core::config::AppConfig;
use trainhub_database::DocumentStore;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

#[tokio::test]
async fn test_upload_mixed_labels() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [
                {"image": helpers::encode(PNG, true), "label": "OK"},
                {"image": helpers::encode(PNG, false), "label": "bad"}
            ]
        }))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);

    let data = response.data();
    assert_eq!(data["count"], 1);
    assert_eq!(data["project"], "P1");
    assert_eq!(data["folder_path"], "/app/file/Home/training_data/P1");
    assert!(data.get("model_file").is_none());

    let files = data["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["label"], "ok");
    let name = files[0]["name"].as_str().unwrap();
    assert!(name.starts_with("P1ok1_") && name.ends_with(".png"));
    assert_eq!(
        files[0]["url"],
        format!("/private/files/Home/training_data/P1/ok/{name}")
    );

    let stored = std::fs::read(app.label_dir("P1", "ok").join(name)).unwrap();
    assert_eq!(stored, PNG);
    assert_eq!(app.count_files(&app.label_dir("P1", "defective")), 0);
    assert_eq!(app.record_count("P1").await, 1);
}

#[tokio::test]
async fn test_repeated_uploads_provision_once() {
    let app = helpers::TestApp::new().await;
    let body = json!({
        "project_name": "P1",
        "training_data": [{"image": helpers::encode(PNG, false), "label": "defective"}]
    });

    assert_eq!(app.upload(body.clone()).await.status, StatusCode::OK);
    assert_eq!(app.upload(body).await.status, StatusCode::OK);

    let roots = app.store.find_children(None).await.unwrap();
    assert_eq!(roots.len(), 1);
    let projects = app.store.find_children(Some(roots[0].id)).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(app.store.folder_count().await, 5);
    assert_eq!(app.count_files(&app.label_dir("P1", "defective")), 2);
}

#[tokio::test]
async fn test_unknown_project() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "Ghost",
            "training_data": [{"image": helpers::encode(PNG, false), "label": "ok"}]
        }))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(
        response.body["message"],
        "Failed to upload training data or model: Project 'Ghost' does not exist."
    );
    assert_eq!(app.store.folder_count().await, 0);
    assert!(!app.dir.path().join("Home").exists());

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [{"image": helpers::encode(PNG, false), "label": "ok"}]
        }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_label_fails_batch() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [
                {"image": helpers::encode(PNG, false), "label": "ok"},
                {"image": helpers::encode(PNG, false)}
            ]
        }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("Missing image or label")
    );
    assert_eq!(app.record_count("P1").await, 0);
    assert_eq!(app.count_files(&app.label_dir("P1", "ok")), 0);
}

#[tokio::test]
async fn test_invalid_base64_rolls_back() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [
                {"image": helpers::encode(PNG, false), "label": "ok"},
                {"image": "data:image/png;base64,@@@", "label": "defective"}
            ]
        }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to upload training data or model: Error saving image file")
    );
    assert_eq!(app.record_count("P1").await, 0);
    assert_eq!(app.count_files(&app.label_dir("P1", "ok")), 0);
}

#[tokio::test]
async fn test_invalid_base64_keeps_files_without_cleanup() {
    let mut config = AppConfig::default();
    config.ingest.cleanup_on_failure = false;
    let app = helpers::TestApp::with_config(config).await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [
                {"image": helpers::encode(PNG, false), "label": "ok"},
                {"image": "@@@", "label": "ok"}
            ]
        }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.record_count("P1").await, 0);
    assert_eq!(app.count_files(&app.label_dir("P1", "ok")), 1);
}

#[tokio::test]
async fn test_invalid_model_rolls_back() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [{"image": helpers::encode(PNG, false), "label": "ok"}],
            "model_file": {"file_data": "!!!", "file_name": "w.h5"}
        }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to upload training data or model: Error saving model file")
    );
    assert_eq!(app.record_count("P1").await, 0);
    assert_eq!(app.count_files(&app.label_dir("P1", "ok")), 0);
    assert_eq!(app.count_files(&app.label_dir("P1", "model")), 0);
}

#[tokio::test]
async fn test_string_encoded_fields_with_model() {
    let app = helpers::TestApp::new().await;

    let training_data = json!([{"image": helpers::encode(PNG, false), "label": "Defective"}]);
    let model_file = json!({"file_data": helpers::encode(b"HDF5", false), "file_name": "weights.txt"});

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": training_data.to_string(),
            "model_file": model_file.to_string()
        }))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["count"], 2);
    assert_eq!(data["files"].as_array().unwrap().len(), 2);
    assert_eq!(
        data["message"],
        "Training data and model file (.h5) uploaded successfully. Please refresh the file manager to see all files."
    );

    let model = &data["model_file"];
    let name = model["name"].as_str().unwrap();
    assert!(name.starts_with("P1model") && name.ends_with(".h5"));
    assert_eq!(model["original_name"], "weights.txt");
    assert_eq!(data["files"][1]["docname"], model["docname"]);
    assert_eq!(data["files"][1]["label"], "model");

    let stored = std::fs::read(app.label_dir("P1", "model").join(name)).unwrap();
    assert_eq!(stored, b"HDF5");
    assert_eq!(app.record_count("P1").await, 2);
}

#[tokio::test]
async fn test_empty_model_is_ignored() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [],
            "model_file": {"file_data": "", "file_name": "weights.h5"}
        }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["count"], 0);
    assert!(response.data().get("model_file").is_none());
    assert_eq!(app.count_files(&app.label_dir("P1", "model")), 0);
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = helpers::TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/method/upload_training_data")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to upload training data or model")
    );
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = AppConfig::default();
    config.server.max_body_bytes = 1024;
    let app = helpers::TestApp::with_config(config).await;

    let response = app
        .upload(json!({
            "project_name": "P1",
            "training_data": [{"image": helpers::encode(&[0u8; 4096], false), "label": "ok"}]
        }))
        .await;

    assert!(response.status.is_client_error());
    assert_eq!(app.record_count("P1").await, 0);
}
