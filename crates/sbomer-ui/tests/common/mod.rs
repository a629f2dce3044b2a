//! Shared test utilities for sbomer-ui integration tests.
//!
//! `FixtureServer` runs a small in-process SBOMer API on an ephemeral port.
//! Responses cover every list envelope the service uses (bare array,
//! `content`/`totalHits`, `data`/`total`) and the error paths the dashboard
//! distinguishes. Every request URI is recorded for assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use sbomer_ui::{DashboardConfig, SbomerClient};

/// Total reported by the generations list, larger than the returned page.
pub const GENERATIONS_TOTAL: u64 = 42;

/// Event query the fixture rejects as syntactically invalid.
pub const INVALID_QUERY: &str = "bad";

/// Event query that makes the fixture fail with HTTP 500.
pub const FAILING_QUERY: &str = "boom";

type RequestLog = Arc<Mutex<Vec<String>>>;

pub struct FixtureServer {
    addr: SocketAddr,
    requests: RequestLog,
}

impl FixtureServer {
    pub async fn start() -> Self {
        let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let app = router().layer(middleware::from_fn_with_state(
            Arc::clone(&requests),
            record,
        ));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Fixture server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fixture server stopped");
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            api_url: self.url(),
            ..Default::default()
        }
    }

    pub fn client(&self) -> SbomerClient {
        SbomerClient::new(&self.url()).expect("Failed to create client")
    }

    /// Request URIs (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|uri| uri.starts_with(prefix))
            .count()
    }
}

async fn record(State(requests): State<RequestLog>, request: Request, next: Next) -> Response {
    requests.lock().unwrap().push(request.uri().to_string());
    next.run(request).await
}

fn router() -> Router {
    Router::new()
        .route("/api/v1/stats", get(stats))
        .route("/api/v1/generations", get(generations))
        .route("/api/v1/generations/{id}", get(generation))
        .route("/api/v1/generations/{id}/logs", get(generation_logs))
        .route("/api/v1/enhancements", get(enhancements))
        .route("/api/v1/enhancements/{id}", get(enhancement))
        .route(
            "/api/v1/enhancements/generation/{id}",
            get(generation_enhancements),
        )
        .route("/api/v1/events", get(events))
        .route("/api/v1/events/{id}", get(event))
        .route("/api/v1/events/{id}/generations", get(event_generations))
        .route("/api/v1/manifests", get(manifests))
        .route("/api/v1/manifests/{id}", get(manifest))
        .route("/api/v1/manifests/{id}/bom", get(manifest_bom))
}

pub fn generation_json(id: &str) -> Value {
    json!({
        "id": id,
        "generatorName": "cyclonedx-maven-plugin",
        "generatorVersion": "2.9.1",
        "created": "2024-06-01T08:00:00Z",
        "updated": "2024-06-01T08:05:00Z",
        "finished": "2024-06-01T08:10:00Z",
        "status": "FINISHED",
        "result": "SUCCESS",
        "requestId": "E1",
        "targetType": "CONTAINER_IMAGE",
        "targetIdentifier": "quay.io/org/image@sha256:abc",
        "metadata": {"product": "rhel"}
    })
}

pub fn enhancement_json(id: &str) -> Value {
    json!({
        "id": id,
        "status": "FINISHED",
        "created": "2024-06-01T08:11:00Z",
        "result": "SUCCESS",
        "generationId": "G1",
        "requestId": "E1",
        "enhancerName": "sorted",
        "enhancerVersion": "1.0.0"
    })
}

pub fn event_json(id: &str) -> Value {
    json!({
        "id": id,
        "creationDate": "2024-06-01T07:59:00Z",
        "status": "PROCESSED"
    })
}

fn not_found(kind: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("{} {} not found", kind, id),
    )
        .into_response()
}

async fn stats() -> Json<Value> {
    Json(json!({
        "version": "1.0.0",
        "uptime": "2h",
        "uptimeMillis": 7_200_000,
        "messaging": {
            "pncConsumer": {"received": 10, "processed": 9, "skipped": 1},
            "errataConsumer": {"received": 4, "processed": 4, "skipped": 0},
            "producer": {"acked": 7, "nacked": 0}
        },
        "resources": {
            "generations": {"total": 42, "inProgress": 3},
            "manifests": {"total": 40}
        }
    }))
}

async fn generations() -> Json<Value> {
    Json(json!({
        "content": [generation_json("G1"), generation_json("G2")],
        "totalHits": GENERATIONS_TOTAL
    }))
}

async fn generation(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return not_found("Generation", &id);
    }
    Json(generation_json(&id)).into_response()
}

async fn generation_logs(Path(id): Path<String>) -> Json<Value> {
    Json(json!([format!("/logs/{}/build.log", id)]))
}

async fn enhancements() -> Json<Value> {
    Json(json!([enhancement_json("EN1")]))
}

async fn enhancement(Path(id): Path<String>) -> Json<Value> {
    Json(enhancement_json(&id))
}

async fn generation_enhancements(Path(id): Path<String>) -> Json<Value> {
    if id == "G2" {
        return Json(json!({"data": [], "total": 0}));
    }
    Json(json!({"data": [enhancement_json("EN1")], "total": 1}))
}

async fn events(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("query").map(String::as_str) {
        Some(INVALID_QUERY) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "The provided query is not valid",
                "details": ["Unknown field bad", "Expected an operator"]
            })),
        )
            .into_response(),
        Some(FAILING_QUERY) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal failure").into_response()
        }
        _ => Json(json!([event_json("E1"), event_json("E2")])).into_response(),
    }
}

async fn event(Path(id): Path<String>) -> Json<Value> {
    Json(event_json(&id))
}

/// `totalHits` of zero exercises the item-count fallback.
async fn event_generations(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({"content": [generation_json("G1")], "totalHits": 0}))
}

async fn manifests() -> Json<Value> {
    Json(json!({
        "content": [{"id": "M1", "created": "2024-06-01T08:10:00Z"}],
        "totalHits": 1
    }))
}

async fn manifest(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "id": id,
        "created": "2024-06-01T08:10:00Z",
        "metadata": {"purl": "pkg:oci/image@sha256:abc"}
    }))
}

async fn manifest_bom(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "bomFormat": "CycloneDX",
        "specVersion": "1.6",
        "serialNumber": format!("urn:uuid:{}", id)
    }))
}
