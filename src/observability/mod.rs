//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (registration, duplicates, rejections, reloads)
//!     → logging.rs (subscriber: env filter + fmt layer)
//!
//! Consumers:
//!     → stderr (pretty for development, compact otherwise)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (template, controller, error)
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
