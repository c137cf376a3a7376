//! Request dispatch.
//!
//! # Responsibilities
//! - Answer preflights and reject methods the relay does not serve
//! - Resolve the request target and hand it to the relay or the static server
//! - Turn every failure into a client response
//!
//! # Design Decisions
//! - `dispatch` is total: it always yields a response, never an error
//! - Requests share nothing mutable; the dispatcher is immutable after startup

use axum::body::Body;
use axum::http::{Method, Request};

use crate::config::RelayConfig;
use crate::http::error::RelayError;
use crate::http::headers::HeaderPolicy;
use crate::http::relay::Relay;
use crate::http::request::{IncomingRequest, RequestMethod};
use crate::http::response::OutgoingResponse;
use crate::http::static_files::StaticFiles;
use crate::routing::{RouteDecision, Router};

/// Everything needed to answer one request.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Router,
    relay: Relay,
    static_files: StaticFiles,
    policy: HeaderPolicy,
    max_body_size: usize,
}

impl Dispatcher {
    pub fn new(
        router: Router,
        relay: Relay,
        static_files: StaticFiles,
        policy: HeaderPolicy,
        max_body_size: usize,
    ) -> Self {
        Self {
            router,
            relay,
            static_files,
            policy,
            max_body_size,
        }
    }

    /// Build a dispatcher (and its outbound client) from configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let policy = HeaderPolicy::new(config.headers.mode);
        let client = crate::http::relay::build_client(&config.upstream)?;

        Ok(Self::new(
            Router::from_config(config),
            Relay::new(client, policy),
            StaticFiles::new(
                &config.static_files.root,
                config.static_files.content_type,
                policy,
            ),
            policy,
            config.limits.max_body_size,
        ))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Answer one client request.
    pub async fn dispatch(&self, request: Request<Body>) -> OutgoingResponse {
        let method = request.method().clone();
        let uri = request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path().to_string(), |pq| pq.to_string());

        match self.try_dispatch(request).await {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    uri = %uri,
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::warn!(
                        method = %method,
                        uri = %uri,
                        status = status.as_u16(),
                        error = %err,
                        "Request failed"
                    );
                } else {
                    tracing::info!(
                        method = %method,
                        uri = %uri,
                        status = status.as_u16(),
                        error = %err,
                        "Request rejected"
                    );
                }
                OutgoingResponse::from_error(&err, &self.policy)
            }
        }
    }

    async fn try_dispatch(&self, request: Request<Body>) -> Result<OutgoingResponse, RelayError> {
        if request.method() == Method::OPTIONS {
            return Ok(OutgoingResponse::preflight(&self.policy));
        }

        let Some(method) = RequestMethod::from_http(request.method()) else {
            return Err(RelayError::UnsupportedMethod(request.method().clone()));
        };

        let incoming = IncomingRequest::from_request(request, method, self.max_body_size).await?;

        match self.router.resolve(&incoming.path) {
            RouteDecision::Upstream {
                host,
                rewritten_path,
            } => self.relay.relay(incoming, &host, &rewritten_path).await,
            RouteDecision::StaticAsset { local_path } => self.static_files.serve(&local_path).await,
        }
    }
}
