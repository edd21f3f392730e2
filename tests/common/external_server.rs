use std::{sync::Arc, time::Duration, net::SocketAddr};

use axum::{Router, extract::{Path, State, Query}, response::{IntoResponse, Response}, Json, routing::get};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{sync::RwLock, task::JoinHandle};

pub const API_TOKEN: &str = "API_TOKEN";

#[derive(Deserialize)]
struct FixturesQuery {
    api_token: String,
    include: String,
}

#[derive(Clone)]
pub struct AppState {
    pub fixtures_rsp: Value,
    pub failure: Option<StatusCode>,
    pub delay: Duration,
    pub calls: Vec<String>,
}

pub struct ExternalServer {
    port: u16,
    handles: Vec<JoinHandle<()>>,
    pub api_state: Arc<RwLock<AppState>>,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl ExternalServer {
    pub fn new(port: u16) -> ExternalServer {
        let api_state = Arc::new(RwLock::new(AppState {
            fixtures_rsp: json!({ "data": [] }),
            failure: None,
            delay: Duration::ZERO,
            calls: vec![],
        }));
        ExternalServer { port, handles: vec![], api_state }
    }

    pub async fn start(&mut self) {
        let external_mock = {
            let port = self.port;
            let state = self.api_state.clone();
            tokio::spawn(async move { ExternalServer::serve_external_data(state, port).await })
        };
        self.handles.push(external_mock);

        tokio::time::sleep(Duration::from_secs(1)).await; // wait for mock to start
    }

    pub async fn set_fixtures_file(&self, path: &str) {
        let data = std::fs::read_to_string(path).expect("fixture file to exist");
        let rsp: Value = serde_json::from_str(&data).expect("fixture file to be json");
        self.set_fixtures_rsp(rsp).await;
    }

    pub async fn set_fixtures_rsp(&self, rsp: Value) {
        self.api_state.write().await.fixtures_rsp = rsp;
    }

    /// Answers with a plain-text body and the given status, like a failing proxy.
    pub async fn set_failure(&self, status: Option<StatusCode>) {
        self.api_state.write().await.failure = status;
    }

    pub async fn set_delay(&self, delay: Duration) {
        self.api_state.write().await.delay = delay;
    }

    pub fn get_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    async fn serve_external_data(state: Arc<RwLock<AppState>>, port: u16) {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let app = Router::new()
            .route("/fixtures/date/:date", get(ExternalServer::get_fixtures))
            .with_state(state);

        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
            .unwrap();
    }

    async fn get_fixtures(
        Path(date): Path<String>,
        Query(query): Query<FixturesQuery>,
        State(state): State<Arc<RwLock<AppState>>>) -> Response {
        if query.api_token != API_TOKEN {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))).into_response();
        }
        assert_eq!(query.include, "participants;scores;league.country;state");

        let (delay, failure, fixtures_rsp) = {
            let mut safe_state = state.write().await;
            safe_state.calls.push(date);
            (safe_state.delay, safe_state.failure, safe_state.fixtures_rsp.clone())
        };
        tokio::time::sleep(delay).await;
        match failure {
            Some(status) => (status, "<html><body>Bad Gateway</body></html>").into_response(),
            None => (StatusCode::OK, Json(fixtures_rsp)).into_response(),
        }
    }
}
