//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     Controller[]
//!     → discovery.rs (collect (template, handler) pairs)
//!     → template.rs (classify: static or dynamic, validate)
//!     → registry.rs (static: exact-match map)
//!     → tree.rs (dynamic: one path-variable tree per first segment)
//!     → router.rs (freeze as immutable RouteTable)
//!
//! Request Path Resolution:
//!     path
//!     → registry.rs (exact match, empty bindings)
//!     → tree.rs (segment walk, literal before variable)
//!     → Return: handler + bindings, or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex anywhere: templates are scanned segment by segment
//! - Deterministic: same input always matches same handler
//! - Duplicate templates: last registration wins

pub mod discovery;
pub mod handler;
pub mod registry;
pub mod router;
pub mod template;
pub mod tree;

pub use discovery::{discover, ControllerCatalog, RouteDefinition, RouteRegistrar};
pub use handler::{Controller, HandlerDescriptor, HandlerFn, PathVars};
pub use router::{RejectedRoute, RouteInfo, RouteKind, RouteMatch, RouteTable, RouteTableBuilder};
pub use template::{Segment, TemplateError, UrlTemplate};
