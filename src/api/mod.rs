//! REST layer over the exploration engine.
//!
//! Thin by design: request decoding, error-to-status mapping, CORS and
//! request tracing. All graph semantics live in `crate::graph`.

use crate::config::Config;
use crate::error::{KgserveError, Result};
use crate::graph::{explore_graph, node_details, GraphData, GraphStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Check if a port is available by attempting to bind to it
async fn check_port_available(port: u16) -> bool {
    tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .is_ok()
}

/// HTTP API server wrapper
pub struct ApiServer {
    state: AppState,
    allowed_origins: Vec<String>,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    store: Arc<dyn GraphStore>,
    config: Config,
}

impl ApiServer {
    pub fn new(store: Arc<dyn GraphStore>, config: Config) -> Self {
        let allowed_origins = config.http_server.allowed_origins.clone();
        Self {
            state: AppState { store, config },
            allowed_origins,
        }
    }

    /// Run the HTTP server
    pub async fn run(&self, port: u16) -> Result<()> {
        let app = self.create_router();

        let addr = format!("127.0.0.1:{}", port);
        log::info!("Starting kgserve HTTP server on http://{}", addr);
        log::info!("Explore endpoint: http://{}/api/kg/explore", addr);

        if !check_port_available(port).await {
            return Err(KgserveError::Config(format!(
                "Port {} is already in use. Stop the process using it or set http_server.port in config.toml.",
                port
            )));
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(KgserveError::Io)?;

        axum::serve(listener, app).await.map_err(|e| {
            KgserveError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP server error: {}", e),
            ))
        })?;

        Ok(())
    }

    /// Create the axum router
    fn create_router(&self) -> Router {
        // Restrict CORS to configured origins; an empty list means
        // local development and allows any origin.
        let cors = if self.allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = self
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/api/kg/explore", post(handle_explore))
            .route("/api/kg/node/:id", get(handle_node))
            .route("/health", get(handle_health))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
            .with_state(self.state.clone())
    }
}

/// Exploration request body
#[derive(Debug, Deserialize)]
struct ExploreRequest {
    #[serde(default)]
    keywords: Vec<String>,
    depth: Option<usize>,
}

/// Handle POST /api/kg/explore
async fn handle_explore(
    State(state): State<AppState>,
    Json(request): Json<ExploreRequest>,
) -> Response {
    let depth = request.depth.unwrap_or(state.config.explore.default_depth);
    match explore_graph(
        state.store.as_ref(),
        &request.keywords,
        depth,
        &state.config.explore,
    )
    .await
    {
        Ok(data) => graph_response(data),
        Err(e) => error_response(e),
    }
}

/// Handle GET /api/kg/node/:id
async fn handle_node(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match node_details(state.store.as_ref(), &id).await {
        Ok(entity) => (StatusCode::OK, Json(entity)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handle health check endpoint
async fn handle_health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "kgserve",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
        .into_response()
}

fn graph_response(data: GraphData) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Map engine errors to HTTP statuses; store-down and bad-query remain
/// distinguishable (503 vs 502).
fn error_status(error: &KgserveError) -> StatusCode {
    match error {
        KgserveError::Validation { .. } => StatusCode::BAD_REQUEST,
        KgserveError::NotFound(_) => StatusCode::NOT_FOUND,
        KgserveError::Adapter(_) => StatusCode::BAD_GATEWAY,
        KgserveError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        KgserveError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        KgserveError::Config(_) | KgserveError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: KgserveError) -> Response {
    let status = error_status(&error);
    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::debug!("Request rejected: {}", error);
    }
    let kind = match &error {
        KgserveError::Validation { .. } => "validation_error",
        KgserveError::NotFound(_) => "not_found",
        KgserveError::Adapter(_) => "store_query_error",
        KgserveError::StoreUnavailable(_) => "store_unavailable",
        KgserveError::Timeout => "timeout",
        _ => "internal_error",
    };
    (
        status,
        Json(serde_json::json!({
            "error": kind,
            "message": error.to_string(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&KgserveError::validation("keywords", "keywords required")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&KgserveError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&KgserveError::Adapter("bad query".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&KgserveError::StoreUnavailable("down".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(error_status(&KgserveError::Timeout), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_explore_request_defaults() {
        let request: ExploreRequest = serde_json::from_str(r#"{"keywords": ["ai"]}"#).unwrap();
        assert_eq!(request.keywords, vec!["ai"]);
        assert!(request.depth.is_none());

        let request: ExploreRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.keywords.is_empty());
    }
}
