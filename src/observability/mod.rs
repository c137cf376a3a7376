//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower-http request spans (server.rs)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, human or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - No metrics endpoint

pub mod logging;

pub use logging::init_logging;
