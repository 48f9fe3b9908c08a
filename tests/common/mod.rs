//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use siege_proxy::{HttpServer, ProxyConfig, Shutdown};
use tokio::net::TcpListener;

/// Call counters kept by the mock upstream.
#[derive(Default)]
pub struct UpstreamCalls {
    pub users: AtomicUsize,
    pub projects: AtomicUsize,
    /// Status the leaderboard answers with; 0 means 200 with the board.
    pub leaderboard_status: AtomicU16,
}

impl UpstreamCalls {
    pub fn projects(&self) -> usize {
        self.projects.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> usize {
        self.users.load(Ordering::SeqCst)
    }
}

/// A running mock of the Siege public API.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub calls: Arc<UpstreamCalls>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make the leaderboard answer with `status` from now on.
    ///
    /// 503 carries a JSON body, any other code a plain-text one.
    pub fn fail_leaderboard(&self, status: u16) {
        self.calls.leaderboard_status.store(status, Ordering::SeqCst);
    }
}

/// Start a mock Siege API on an ephemeral port.
///
/// Users: `u1` (projects p1, p2), `u2` (no projects), `u3` (p3, p1, p4),
/// `dots` (projects `..`, p1), `broken` (invalid JSON), `headers` (echoes
/// request headers); others 404.
/// Projects: `p1` ok, `p2` answers 500, `p3` ok, anything else 404.
pub async fn start_mock_upstream() -> MockUpstream {
    let calls = Arc::new(UpstreamCalls::default());

    let app = Router::new()
        .route("/api/public-beta/user/{id}", get(user))
        .route("/api/public-beta/project/{id}", get(project))
        .route("/api/public-beta/leaderboard/", get(leaderboard))
        .with_state(calls.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

async fn user(
    State(calls): State<Arc<UpstreamCalls>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    calls.users.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        "u1" => Json(json!({"id": "u1", "projects": [{"id": "p1"}, {"id": "p2"}]})).into_response(),
        "u2" => Json(json!({"id": "u2", "name": "Grace"})).into_response(),
        "u3" => Json(json!({
            "id": "u3",
            "projects": [{"id": "p3"}, {"id": "p1"}, {"id": "p4", "name": "Gone"}]
        }))
        .into_response(),
        "dots" => Json(json!({"id": "dots", "projects": [{"id": ".."}, {"id": "p1"}]})).into_response(),
        "broken" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "headers" => {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            };
            Json(json!({
                "accept": header("accept"),
                "accept_language": header("accept-language"),
                "user_agent": header("user-agent"),
            }))
            .into_response()
        }
        _ => (StatusCode::NOT_FOUND, "no such user").into_response(),
    }
}

async fn project(State(calls): State<Arc<UpstreamCalls>>, Path(id): Path<String>) -> Response {
    calls.projects.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        "p1" => Json(json!({"id": "p1", "score": 10})).into_response(),
        "p2" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "p3" => Json(json!({"id": "p3", "score": 7, "title": "Lighthouse"})).into_response(),
        _ => (StatusCode::NOT_FOUND, "no such project").into_response(),
    }
}

async fn leaderboard(State(calls): State<Arc<UpstreamCalls>>) -> Response {
    match calls.leaderboard_status.load(Ordering::SeqCst) {
        0 => Json(json!([
            {"name": "u1", "coins": 120},
            {"name": "u2", "coins": 80}
        ]))
        .into_response(),
        503 => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "maintenance"})),
        )
            .into_response(),
        code => (
            StatusCode::from_u16(code).unwrap(),
            "upstream exploded",
        )
            .into_response(),
    }
}

/// Start the proxy against `upstream_base_url` on an ephemeral port.
pub async fn start_proxy(upstream_base_url: &str) -> (SocketAddr, Shutdown) {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = upstream_base_url.to_string();

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
