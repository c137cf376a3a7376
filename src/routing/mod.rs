//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request target (path + query)
//!     → router.rs (ordered rule scan)
//!     → rule.rs (prefix match, strip)
//!     → Return: Upstream(host, rewritten path) or StaticAsset(local path)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → ProxyRule[] in configured order
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Decision depends on the path alone, never on method, headers or body
//! - Deterministic: same input always matches same route
//! - First match wins (configured order)

pub mod router;
pub mod rule;

pub use router::{resolve, RouteDecision, Router};
pub use rule::ProxyRule;
