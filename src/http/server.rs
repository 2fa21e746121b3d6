//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all handler
//! - Wire up middleware (request ID, timeout, body limit, tracing)
//! - Hand every request to the resource router
//! - Serve until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{decode_path, parse_query, request_id, UuidRequestId};
use crate::http::response::into_response;
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::resource::{status, Outcome};
use crate::routing::{RequestInput, ResourceRouter, Routed};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<ResourceRouter>,
}

/// HTTP server exposing a [`ResourceRouter`].
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `resources`.
    pub fn new(config: ServiceConfig, resources: Arc<ResourceRouter>) -> Self {
        let state = AppState { resources };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(resource_handler))
            .route("/", any(resource_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The Axum router, for serving it some other way or driving it in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server on `listener` until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.api.prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler.
/// Decodes the path, dispatches on the blocking pool and maps the outcome.
async fn resource_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    let path = match decode_path(uri.path()) {
        Ok(path) => path.into_owned(),
        Err(e) => {
            tracing::warn!(request_id = %request_id, path = %uri.path(), error = %e, "Undecodable path");
            metrics::record_request(method.as_str(), status::BAD_REQUEST, "none", start);
            return into_response(Outcome::failed(status::BAD_REQUEST, e));
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Handling request"
    );

    let input = RequestInput::new(body, parse_query(uri.query()));
    let resources = state.resources.clone();
    let task_method = method.clone();
    let task_path = path.clone();

    // Handlers may block.
    let routed = match tokio::task::spawn_blocking(move || {
        resources.route(task_method.as_str(), &task_path, input)
    })
    .await
    {
        Ok(routed) => routed,
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Resource handler failed");
            Routed {
                resource: None,
                outcome: Outcome::failed(status::INTERNAL_SERVER_ERROR, "Resource handler failed"),
            }
        }
    };
    let resource = routed.resource.as_deref().unwrap_or("none");
    let outcome = routed.outcome;

    if let Some(error) = &outcome.error {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            resource = %resource,
            status = outcome.status,
            error = %error,
            "Request failed"
        );
    } else {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            resource = %resource,
            status = outcome.status,
            "Request handled"
        );
    }

    metrics::record_request(method.as_str(), outcome.status, resource, start);
    into_response(outcome)
}
