//! Integration tests against a local stub of the deployment backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use launchpad_api::{ApiError, DeployApi};
use serde_json::{json, Value};

/// Bind a stub backend on an ephemeral port and return its base URL.
async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn trigger_parses_success_response() {
    let router = Router::new().route(
        "/api/deploy",
        post(|| async {
            Json(json!({
                "message": "ok",
                "pipeline_id": "123",
                "pipeline_url": "http://x"
            }))
        }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let result = api.trigger("Isaac").await.unwrap();

    assert_eq!(result.message, "ok");
    assert_eq!(result.pipeline_id, "123");
    assert_eq!(result.pipeline_url.as_deref(), Some("http://x"));
}

#[tokio::test]
async fn trigger_tolerates_missing_pipeline_url() {
    let router = Router::new().route(
        "/api/deploy",
        post(|| async { Json(json!({"message": "ok", "pipeline_id": "123"})) }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let result = api.trigger("Isaac").await.unwrap();

    assert!(result.pipeline_url.is_none());
}

#[tokio::test]
async fn trigger_sends_username_in_body() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/api/deploy",
            post(
                |State(seen): State<Arc<Mutex<Vec<Value>>>>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({"message": "ok", "pipeline_id": "1"}))
                },
            ),
        )
        .with_state(Arc::clone(&seen));
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    api.trigger("Al").await.unwrap();

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0], json!({"username": "Al"}));
}

#[tokio::test]
async fn trigger_surfaces_rejection_detail() {
    let router = Router::new().route(
        "/api/deploy",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"detail": "bad name"}))) }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let err = api.trigger("Isaac").await.unwrap_err();

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(detail.as_deref(), Some("bad name"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn trigger_rejection_without_body_has_no_detail() {
    let router = Router::new().route(
        "/api/deploy",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let err = api.trigger("Isaac").await.unwrap_err();

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(detail.is_none());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn trigger_malformed_success_body_is_transport_error() {
    let router = Router::new().route("/api/deploy", post(|| async { "not json" }));
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let err = api.trigger("Isaac").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn trigger_connection_refused_is_transport_error() {
    // Bind then drop the listener so the port is known-closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = DeployApi::with_url(format!("http://{addr}")).unwrap();
    let err = api.trigger("Isaac").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn health_reports_backend_status() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "healthy", "service": "backend"})) }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let health = api.health().await.unwrap();

    assert!(health.is_healthy());
}

#[tokio::test]
async fn pipeline_status_round_trip() {
    let router = Router::new().route(
        "/api/status/{pipeline_id}",
        get(|Path(pipeline_id): Path<String>| async move {
            Json(json!({
                "pipeline_id": pipeline_id,
                "status": "running",
                "message": "Pipeline ejecutándose...",
                "created_at": "2024-01-01T00:00:00Z"
            }))
        }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let status = api.pipeline_status("abc-123").await.unwrap();

    assert_eq!(status.pipeline_id, "abc-123");
    assert_eq!(status.status, "running");
    assert!(!status.is_terminal());
    assert_eq!(status.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert!(status.stopped_at.is_none());
}

#[tokio::test]
async fn pipeline_status_not_found_is_rejection() {
    let router = Router::new().route(
        "/api/status/{pipeline_id}",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "unknown pipeline"}))) }),
    );
    let base = serve_stub(router).await;

    let api = DeployApi::with_url(base).unwrap();
    let err = api.pipeline_status("nope").await.unwrap_err();

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(detail.as_deref(), Some("unknown pipeline"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
