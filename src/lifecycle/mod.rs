//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build constants → Mount controller sets
//!     → Collect routes → Build RouteTable → AppContext
//!
//! Reload (reload.rs):
//!     Config change → bootstrap new AppContext → atomic swap
//!     (failed bootstrap keeps the current context)
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Published contexts are never mutated; reload replaces them whole

pub mod reload;
pub mod startup;

pub use reload::SharedContext;
pub use startup::{bootstrap, AppContext, InitError};
