//! HTTP front end for the relay.

use crate::github::GitHubClient;
use crate::handler::{handle, ProxyResponse};
use crate::types::Credential;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared, read-only state for request handlers.
#[derive(Debug)]
pub struct AppState {
    pub client: GitHubClient,
    pub credential: Option<Credential>,
}

/// Headers that describe the upstream connection rather than the content.
fn is_hop_by_hop(name: &header::HeaderName) -> bool {
    [
        header::CONNECTION,
        header::TRANSFER_ENCODING,
        header::TE,
        header::TRAILER,
        header::UPGRADE,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
    ]
    .contains(name)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(get(relay_handler))
        .with_state(state)
}

async fn relay_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    tracing::debug!("GET {}", uri.path());
    handle(&state.client, uri.path(), state.credential.as_ref())
        .await
        .into_response()
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        match self {
            ProxyResponse::Version(version) => (StatusCode::OK, version).into_response(),
            ProxyResponse::Asset(upstream) => forward(upstream),
            ProxyResponse::Error(e) => (e.status_code(), e.public_message()).into_response(),
        }
    }
}

/// Relay an upstream response, streaming its body.
fn forward(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = HeaderMap::with_capacity(upstream.headers().len());
    for (name, value) in upstream.headers() {
        if !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    (status, headers, Body::from_stream(upstream.bytes_stream())).into_response()
}

/// Serve the relay on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    if state.credential.is_none() {
        tracing::warn!("No credential configured, all requests will be rejected");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Relaying latest release of {} on http://{}",
        crate::github::REPOSITORY,
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
