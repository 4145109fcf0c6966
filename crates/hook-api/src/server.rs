//! Axum server and routes.

use crate::capture::{self, MAX_BODY_BYTES};
use crate::render::HtmlRenderer;
use crate::sink::TracingSink;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use bytes::Bytes;
use hook_types::{CaptureEvent, CaptureSink, CaptureStore, Record, RenderError, Renderer};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub store: Arc<dyn CaptureStore + Send + Sync>,
    pub sink: Arc<dyn CaptureSink + Send + Sync>,
    pub renderer: Arc<dyn Renderer + Send + Sync>,
}

impl AppState {
    /// State with the console sink and the HTML renderer.
    pub fn new(store: Arc<dyn CaptureStore + Send + Sync>) -> Self {
        Self {
            store,
            sink: Arc::new(TracingSink),
            renderer: Arc::new(HtmlRenderer::new()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/wh/", any(handle_capture))
        .route("/wh/*rest", any(handle_capture))
        .route("/ui", get(handle_view))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct CaptureAck {
    pub success: bool,
    pub message: String,
}

/// Bodies over the limit are rejected by the `Bytes` extractor with 413 before this runs.
async fn handle_capture(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<CaptureAck> {
    let record = capture::normalize(&method, &uri, &headers, body, capture::now_timestamp());
    let (timestamp, method, path) = (
        record.timestamp.clone(),
        record.method.clone(),
        record.path.clone(),
    );
    let id = state.store.append(record).await;
    state.sink.captured(&CaptureEvent {
        id,
        timestamp,
        method,
        path,
    });
    Json(CaptureAck {
        success: true,
        message: "Webhook received".to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "failed to render webhook view");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to render webhooks",
        )
            .into_response()
    }
}

async fn handle_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, ViewError> {
    let mut records: Vec<Arc<Record>> = state.store.snapshot().await;
    records.reverse();
    let html = state.renderer.render(&records)?;
    Ok(Html(html))
}
