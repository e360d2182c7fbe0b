//! HTTP REST API.
//!
//! `GET /?rc_number=..` and `POST /` both run one lookup and answer with an
//! [`Envelope`]. `GET /health` is a fixed liveness payload.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, RawQuery, Request, State};
use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use rc_lookup::{lookup_vehicle, FetchConfig, HttpFetcher, LookupResult, PageSource};

use crate::envelope::Envelope;

/// Name reported by `/health`.
pub const SERVICE_NAME: &str = "Vehicle RC Details API";

/// API version reported by `/health`. Independent of the crate version.
pub const API_VERSION: &str = "1.0";

/// Query/body key carrying the identifier.
const RC_PARAM: &str = "rc_number";

/// Shared server state. Built once at startup and only read afterwards.
pub struct AppState {
    source: Arc<dyn PageSource>,
}

impl AppState {
    pub fn new(source: impl PageSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// State backed by the real lookup site.
    pub fn http(config: FetchConfig) -> LookupResult<Self> {
        Ok(Self::new(HttpFetcher::new(config)?))
    }

    /// Run one lookup for a raw identifier.
    pub async fn lookup(&self, raw: Option<&str>) -> Envelope {
        Envelope::from_result(lookup_vehicle(self.source.as_ref(), raw).await)
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(lookup_get).post(lookup_post))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn start(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

// ── Identifier extraction ───────────────────────────────────────

/// `rc_number` from a url-encoded query string or form body. First value wins.
fn rc_from_urlencoded(input: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(input)
        .find(|(key, _)| key == RC_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// `rc_number` from a JSON object body. Non-string values count as missing.
fn rc_from_json(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get(RC_PARAM)?.as_str().map(str::to_string)
}

fn media_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// `rc_number` from a POST body: JSON first, then url-encoded form.
fn rc_from_body(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    let mime = media_type(headers);
    let is_json = mime == "application/json" || mime.ends_with("+json");

    if is_json {
        if let Some(rc) = rc_from_json(body) {
            return Some(rc);
        }
    }
    if mime == "application/x-www-form-urlencoded" {
        return rc_from_urlencoded(body);
    }
    None
}

/// `rc_number` from a multipart form. File parts are not form values; the
/// first text part with the right name wins.
async fn rc_from_multipart(mut multipart: Multipart) -> Option<String> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some(RC_PARAM) && field.file_name().is_none() {
            return field.text().await.ok();
        }
    }
    None
}

/// `rc_number` from a whole POST request, dispatching on the content type.
async fn rc_from_request(request: Request) -> Option<String> {
    if media_type(request.headers()) == "multipart/form-data" {
        let multipart = Multipart::from_request(request, &()).await.ok()?;
        return rc_from_multipart(multipart).await;
    }
    let headers = request.headers().clone();
    let body = Bytes::from_request(request, &()).await.ok()?;
    rc_from_body(&headers, &body)
}

// ── Handlers ────────────────────────────────────────────────────

async fn lookup_get(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Envelope {
    let rc = query.and_then(|q| rc_from_urlencoded(q.as_bytes()));
    state.lookup(rc.as_deref()).await
}

async fn lookup_post(State(state): State<Arc<AppState>>, request: Request) -> Envelope {
    let rc = rc_from_request(request).await;
    state.lookup(rc.as_deref()).await
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": API_VERSION,
    }))
}
