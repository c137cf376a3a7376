//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, panic recovery)
//! - Log the route table at startup
//! - Serve on a bound listener until shutdown is signalled
//!
//! # Design Decisions
//! - Every path and method reaches the dispatcher; there are no axum routes
//! - Each connection is served concurrently by axum; requests share only
//!   immutable state

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::http::dispatch::Dispatcher;
use crate::http::error::RelayError;
use crate::http::headers::HeaderPolicy;
use crate::http::response::OutgoingResponse;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the outbound HTTP client cannot be built.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let dispatcher = Arc::new(Dispatcher::from_config(&config)?);
        let state = AppState {
            dispatcher: dispatcher.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            dispatcher,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let policy = HeaderPolicy::new(config.headers.mode);

        Router::new()
            .fallback(relay_handler)
            .with_state(state)
            .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
                panic_response(panic, &policy)
            }))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        for rule in self.dispatcher.router().rules() {
            tracing::info!(
                route = %rule.name(),
                prefix = %rule.prefix(),
                upstream = %rule.upstream(),
                local = %format!("http://{addr}{}", rule.prefix()),
                "Proxy route mounted"
            );
        }
        tracing::info!(
            root = %self.config.static_files.root,
            default_document = %self.config.static_files.default_document,
            header_mode = ?self.config.headers.mode,
            "Serving static files"
        );
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Catch-all handler: every request goes through the dispatcher.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> OutgoingResponse {
    state.dispatcher.dispatch(request).await
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, policy: &HeaderPolicy) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(detail = %detail, "Request handler panicked");

    OutgoingResponse::from_error(&RelayError::Internal(detail), policy).into_response()
}
