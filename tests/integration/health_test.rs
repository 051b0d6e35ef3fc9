//! Integration tests for the health endpoint.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_components() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"]["provider"], "memory");
    assert_eq!(response.data()["store"]["healthy"], true);
    assert_eq!(response.data()["storage"]["provider"], "local");
}

#[tokio::test]
async fn test_storage_root_removed_is_degraded() {
    let app = helpers::TestApp::new().await;
    std::fs::remove_dir_all(app.dir.path()).unwrap();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.data()["status"], "degraded");
    assert_eq!(response.data()["storage"]["healthy"], false);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/method/nope", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
