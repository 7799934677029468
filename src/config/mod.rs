//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment variable overrides)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload (restart instead)
//! - All fields have defaults so the watcher runs with no config file
//! - Environment variables win over file values, matching how the
//!   watcher is deployed alongside the load balancer

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AlertConfig, ObservabilityConfig, SourceConfig, WatcherConfig, WindowConfig};
