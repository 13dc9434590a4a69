use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::fixtures::BootstrapZone;

type Zone = HashMap<(String, u16), Vec<(u16, String)>>;

struct ServerState {
    zone: Zone,
    failing: RwLock<HashSet<String>>,
    queries: AtomicUsize,
}

/// DoH JSON server serving a fixed zone on `127.0.0.1`.
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Serves [`BootstrapZone`].
    pub async fn start() -> Result<Self, std::io::Error> {
        Self::with_zone(BootstrapZone::records()).await
    }

    pub async fn with_zone(zone: Zone) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ServerState {
            zone,
            failing: RwLock::new(HashSet::new()),
            queries: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/resolve", axum::routing::get(resolve))
            .with_state(state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/resolve", self.addr)
    }

    /// Makes every query for `name` answer with HTTP 500.
    pub fn fail_name(&self, name: &str) {
        if let Ok(mut failing) = self.state.failing.write() {
            failing.insert(name.to_string());
        }
    }

    pub fn query_count(&self) -> usize {
        self.state.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn resolve(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.queries.fetch_add(1, Ordering::SeqCst);

    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        == Some("application/dns-json");
    if !accepts_json {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, String::new());
    }

    let name = params.get("name").cloned().unwrap_or_default();
    let Some(record_type) = params.get("type").and_then(|t| t.parse::<u16>().ok()) else {
        return (StatusCode::BAD_REQUEST, String::new());
    };

    let failing = state
        .failing
        .read()
        .map(|f| f.contains(&name))
        .unwrap_or(false);
    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }

    let body = match state.zone.get(&(name.clone(), record_type)) {
        Some(answers) => {
            let answers: Vec<serde_json::Value> = answers
                .iter()
                .map(|(t, data)| {
                    serde_json::json!({ "name": format!("{}.", name), "type": t, "TTL": 300, "data": data })
                })
                .collect();
            serde_json::json!({
                "Status": 0,
                "Question": [{ "name": format!("{}.", name), "type": record_type }],
                "Answer": answers,
            })
        }
        None => serde_json::json!({
            "Status": 3,
            "Question": [{ "name": format!("{}.", name), "type": record_type }],
        }),
    };

    (StatusCode::OK, body.to_string())
}
