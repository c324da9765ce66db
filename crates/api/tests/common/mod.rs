#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use folio_db::{JsonFileStore, ReadPolicy};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::service::ProjectService;
use folio_api::state::AppState;

pub const BOUNDARY: &str = "folio-test-boundary";

/// A router wired to a fresh document and upload directory in a temp dir.
pub struct TestApp {
    pub router: Router,
    pub data_file: PathBuf,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Number of records currently in the document on disk.
    pub fn stored_count(&self) -> usize {
        let raw = std::fs::read_to_string(&self.data_file).unwrap();
        serde_json::from_str::<Vec<serde_json::Value>>(&raw)
            .unwrap()
            .len()
    }

    /// Number of files currently in the upload directory.
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }

    /// Disk path for a record's `/uploads/<filename>` image path.
    pub fn image_file(&self, image_path: &str) -> PathBuf {
        let name = image_path.strip_prefix("/uploads/").unwrap();
        self.upload_dir.join(name)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Build a test `ServerConfig` pointing at `dir`.
pub fn test_config(dir: &TempDir, read_policy: ReadPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_file: dir.path().join("database").join("project.json"),
        upload_dir: dir.path().join("uploads"),
        max_upload_bytes: 1024 * 1024,
        read_policy,
    }
}

/// Build the full application router exactly as `main.rs` does.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_policy(ReadPolicy::FailOpen).await
}

pub async fn build_test_app_with_policy(read_policy: ReadPolicy) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, read_policy);
    std::fs::create_dir_all(&config.upload_dir).unwrap();

    let store = JsonFileStore::open(&config.data_file, config.read_policy)
        .await
        .unwrap();
    let projects = Arc::new(ProjectService::new(
        Arc::new(store),
        config.upload_dir.clone(),
    ));
    let state = AppState {
        config: Arc::new(config.clone()),
        projects,
    };

    TestApp {
        router: build_app_router(state, &config),
        data_file: config.data_file.clone(),
        upload_dir: config.upload_dir.clone(),
        _dir: dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &TestApp, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.send(request).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.send(request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: &TestApp, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.send(request).await
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: &TestApp,
    method: Method,
    uri: &str,
    parts: &[Part<'_>],
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.send(request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
