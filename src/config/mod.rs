//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → constants.rs (ConstantStore built at startup)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new RouterConfig sent to the reload loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod constants;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use constants::ConstantStore;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ConstantConfig, LogFormat, ObservabilityConfig, RouterConfig, RoutingConfig, ScanConfig};
