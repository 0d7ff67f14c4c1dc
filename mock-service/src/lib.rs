//! Mock Text Generation Inference server.
//!
//! Serves `GET /info` and `POST /generate` with a configurable delay and response shape.
//! Instances that share a [`Contention`] tracker slow each other down while their requests
//! overlap, which is roughly what two models on one time-sliced GPU look like from outside.
use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub mod prelude {
    pub use crate::{run, spawn, Contention, MockConfig, MockResponse};
}

/// What `/generate` answers with. Every variant is sent with a 200 status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockResponse {
    /// `{"generated_text": ...}`
    Generated,
    /// `[{"generated_text": ...}]`
    Batched,
    /// `{"error": ..., "error_type": ...}`
    Error,
    /// Empty body.
    Empty,
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub model_id: String,
    pub delay: Duration,
    pub response: MockResponse,
    /// Answer `/info` with an empty body.
    pub silent_info: bool,
    pub contention: Arc<Contention>,
}

impl MockConfig {
    pub fn new(model_id: &str, delay: Duration) -> Self {
        Self {
            model_id: model_id.to_string(),
            delay,
            response: MockResponse::Generated,
            silent_info: false,
            contention: Arc::new(Contention::default()),
        }
    }

    pub fn response(mut self, response: MockResponse) -> Self {
        self.response = response;
        self
    }

    pub fn silent_info(mut self) -> Self {
        self.silent_info = true;
        self
    }

    /// Shares a contention tracker with other instances.
    pub fn contention(mut self, contention: &Arc<Contention>) -> Self {
        self.contention = contention.clone();
        self
    }
}

/// Counts `/generate` requests in flight across every instance sharing it.
#[derive(Debug, Default)]
pub struct Contention {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl Contention {
    /// Most requests that were ever in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) -> InFlight<'_> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        InFlight {
            contention: self,
            entered_with: current,
        }
    }
}

struct InFlight<'a> {
    contention: &'a Contention,
    entered_with: usize,
}

impl InFlight<'_> {
    fn sharing(&self) -> usize {
        self.entered_with
            .max(self.contention.in_flight.load(Ordering::SeqCst))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.contention.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn router(config: MockConfig) -> Router {
    Router::new()
        .route("/info", get(info))
        .route("/generate", post(generate))
        .with_state(Arc::new(config))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, config: MockConfig) -> std::io::Result<()> {
    axum::serve(listener, router(config)).await
}

/// Binds an ephemeral local port and serves `config` in the background.
pub async fn spawn(config: MockConfig) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = run(listener, config).await;
    });
    Ok(addr)
}

async fn info(State(config): State<Arc<MockConfig>>) -> String {
    if config.silent_info {
        return String::new();
    }

    json!({
        "model_id": config.model_id,
        "max_total_tokens": 2048,
        "router": "text-generation-router",
    })
    .to_string()
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    inputs: String,
    #[serde(default)]
    parameters: Option<Value>,
}

async fn generate(
    State(config): State<Arc<MockConfig>>,
    Json(body): Json<GenerateBody>,
) -> String {
    debug!("{} <- {:?} {:?}", config.model_id, body.inputs, body.parameters);

    let guard = config.contention.enter();
    tokio::time::sleep(config.delay).await;
    // Every other overlapping request gets its own slice of the GPU.
    let sharing = guard.sharing();
    if sharing > 1 {
        tokio::time::sleep(config.delay * (sharing as u32 - 1)).await;
    }
    drop(guard);

    let text = format!("{} says: {}", config.model_id, body.inputs);
    match config.response {
        MockResponse::Generated => json!({ "generated_text": text }).to_string(),
        MockResponse::Batched => json!([{ "generated_text": text }]).to_string(),
        MockResponse::Error => json!({
            "error": "Request failed during generation: Server error: CUDA out of memory",
            "error_type": "generation",
        })
        .to_string(),
        MockResponse::Empty => String::new(),
    }
}
