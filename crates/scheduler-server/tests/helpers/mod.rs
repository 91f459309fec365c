use assert_cmd::Command;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use scheduler_core::db::establish_connection;
use scheduler_core::repository::SqliteRepository;
use scheduler_server::api::build_router;
use scheduler_server::state::{AppState, Clock};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a throwaway database, with "today" pinned to 2024-01-26.
#[allow(dead_code)]
pub struct ApiTestHarness {
    pub router: Router,
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl ApiTestHarness {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("scheduler.db");
        let web_dir = temp_dir.path().join("web");
        std::fs::create_dir_all(&web_dir).expect("Failed to create web dir");
        std::fs::write(web_dir.join("index.html"), "<h1>scheduler</h1>")
            .expect("Failed to write index.html");

        let pool = establish_connection(&db_path.to_string_lossy())
            .await
            .expect("Failed to establish test database connection");
        let state = Arc::new(AppState::new(
            SqliteRepository::new(pool),
            Clock::Fixed(today()),
            50,
        ));

        Self {
            router: build_router(state, &web_dir),
            temp_dir,
        }
    }

    /// Sends a request and returns the status with the raw body text.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Like [`ApiTestHarness::send`], but parses the body as JSON.
    pub async fn send_json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = self.send(method, uri, body).await;
        let json = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("Body is not JSON ({}): {}", e, text));
        (status, json)
    }

    /// Creates a task and returns its id.
    pub async fn create(&self, body: Value) -> i64 {
        let (status, json) = self.send_json(Method::POST, "/api/task", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["id"].as_i64().expect("id should be numeric")
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
}

/// Runs the `scheduler` binary with a clean environment.
#[allow(dead_code)]
pub struct CliTestHarness {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl CliTestHarness {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// A command running inside the temp dir, so no stray `scheduler.toml` or `.env` is picked up.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("scheduler").expect("Failed to find scheduler binary");
        cmd.current_dir(self.temp_dir.path())
            .env_remove("TODO_TIMEZONE")
            .env_remove("TODO_PORT")
            .env_remove("TODO_DBFILE")
            .env("RUST_LOG", "off");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}
