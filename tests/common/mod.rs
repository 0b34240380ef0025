#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

use yoco_relay::models::payment::{ChargeResult, GatewayCharge, GatewayReply};
use yoco_relay::services::{ChargeGateway, PaymentService};
use yoco_relay::{router, AppState, Config, GatewayError, SecretKey};

pub const TEST_SECRET: &str = "sk_test_relay";

type ReplyFn = Box<dyn Fn() -> Result<GatewayReply, GatewayError> + Send + Sync>;

/// In-process gateway that records every charge it is asked to make.
pub struct FakeGateway {
    reply: ReplyFn,
    calls: AtomicUsize,
    charges: Mutex<Vec<GatewayCharge>>,
}

impl FakeGateway {
    pub fn replying(http_status: u16, body: Value) -> Arc<Self> {
        Self::with(move || {
            Ok(GatewayReply {
                http_status,
                result: ChargeResult::from_json(&body),
                raw: body.clone(),
            })
        })
    }

    pub fn failing() -> Arc<Self> {
        Self::with(|| Err(GatewayError::Timeout(Duration::from_secs(15))))
    }

    fn with(reply: impl Fn() -> Result<GatewayReply, GatewayError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            charges: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn charges(&self) -> Vec<GatewayCharge> {
        self.charges.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChargeGateway for FakeGateway {
    async fn create_charge(&self, charge: &GatewayCharge) -> Result<GatewayReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.charges.lock().unwrap().push(charge.clone());
        (self.reply)()
    }
}

pub fn app_with_gateway(gateway: Arc<FakeGateway>) -> Router {
    let gateway: Arc<dyn ChargeGateway> = gateway;
    router(AppState::new(PaymentService::new(Some(gateway)), "does-not-exist.html"))
}

pub fn app_without_secret() -> Router {
    router(AppState::new(PaymentService::new(None), "does-not-exist.html"))
}

pub fn test_config(gateway_url: Url, gateway_timeout: Duration) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        secret_key: SecretKey::new(TEST_SECRET),
        gateway_url,
        gateway_timeout,
        index_file: PathBuf::from("does-not-exist.html"),
        public_url: None,
    }
}

pub async fn post_json(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn pay(app: Router, body: Value) -> (StatusCode, Value) {
    post_json(app, "/paiement", body.to_string()).await
}

/// Request as seen by the fake HTTP gateway.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub secret_key: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeServerState {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn fake_charges(
    State(state): State<FakeServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        secret_key: header_value("x-auth-secret-key"),
        content_type: header_value("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    tokio::time::sleep(state.delay).await;
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// Starts an HTTP server on a free local port that answers `POST /v1/charges`
/// with a fixed status and body.
pub async fn spawn_http_gateway(
    status: u16,
    body: &str,
    delay: Duration,
) -> (Url, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = FakeServerState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        delay,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/charges", post(fake_charges))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), seen)
}

/// URL of a local port nobody listens on.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}
