//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use generate_gateway::config::{GatewayConfig, ModeConfig};
use generate_gateway::{HttpServer, Shutdown};

/// Requests seen by a mock upstream.
#[derive(Clone, Default)]
pub struct Recorded {
    payloads: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    pub fn count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn last(&self) -> Option<Value> {
        self.payloads.lock().unwrap().last().cloned()
    }
}

struct MockState<F> {
    recorded: Recorded,
    respond: Arc<F>,
}

impl<F> Clone for MockState<F> {
    fn clone(&self) -> Self {
        Self {
            recorded: self.recorded.clone(),
            respond: self.respond.clone(),
        }
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `respond` receives the JSON payload and returns the status and body to send.
pub async fn start_mock_upstream<F, Fut>(respond: F) -> (SocketAddr, Recorded)
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    async fn handle<F, Fut>(State(state): State<MockState<F>>, Json(payload): Json<Value>) -> (StatusCode, String)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = (u16, String)> + Send + 'static,
    {
        state.recorded.payloads.lock().unwrap().push(payload.clone());
        let (status, body) = (state.respond)(payload).await;
        (StatusCode::from_u16(status).unwrap(), body)
    }

    let recorded = Recorded::default();
    let state = MockState {
        recorded: recorded.clone(),
        respond: Arc::new(respond),
    };
    let app = Router::new()
        .route("/generate", post(handle::<F, Fut>))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

/// Mock upstream that answers every request with `{"text": text}`.
#[allow(dead_code)]
pub async fn start_text_upstream(text: &'static str) -> (SocketAddr, Recorded) {
    start_mock_upstream(move |_| async move {
        (200, serde_json::json!({ "text": text }).to_string())
    })
    .await
}

/// Mode file used across the integration tests.
pub fn modes() -> ModeConfig {
    serde_json::from_value(serde_json::json!({
        "default": { "max_length": 200 },
        "modes": { "fast": { "max_length": 100, "temp": 0.2 } }
    }))
    .unwrap()
}

/// A running gateway pointed at `upstream`.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    pub async fn start(upstream: SocketAddr, timeout_secs: u64) -> Self {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.upstream.url = format!("http://{}/generate", upstream);
        config.upstream.timeout_secs = timeout_secs;

        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(config, modes()).unwrap();

        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, signal).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        Self { addr, client, shutdown }
    }

    pub async fn generate(&self, body: Value) -> (u16, Value) {
        let res = self
            .client
            .post(format!("http://{}/generate", self.addr))
            .json(&body)
            .send()
            .await
            .expect("gateway unreachable");
        let status = res.status().as_u16();
        let body = res.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
