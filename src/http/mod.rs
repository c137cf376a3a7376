//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all handler, tracing, panic recovery)
//!     → dispatch.rs (OPTIONS preflight, method check)
//!     → request.rs (raw target, declared body)
//!     → [routing layer picks upstream or static asset]
//!     → relay.rs (one upstream exchange, headers.rs filtering)
//!       or static_files.rs (read file under the static root)
//!     → response.rs (status, filtered headers, CORS, buffered body)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod error;
pub mod headers;
pub mod mime;
pub mod relay;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use dispatch::Dispatcher;
pub use error::RelayError;
pub use headers::{Direction, HeaderPolicy};
pub use relay::{build_client, upstream_url, Relay};
pub use request::{IncomingRequest, RequestMethod};
pub use response::OutgoingResponse;
pub use server::{AppState, HttpServer};
pub use static_files::StaticFiles;
