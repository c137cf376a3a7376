//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! profile defaults (proxy | standalone)
//!     → config file (TOML), loader.rs parses & deserializes
//!     → CLI / environment overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the relay never reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod profile;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_over, parse_config, parse_config_over, ConfigError};
pub use profile::Profile;
pub use schema::{
    ContentTypeMode, HeaderMode, ListenerConfig, RelayConfig, RouteConfig, StaticFilesConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
