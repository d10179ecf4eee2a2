//! Routing core for an annotation-free MVC framework.
//!
//! Controllers declare `(template, handler)` pairs, static templates go into
//! an exact-match registry, templates with `{name}` segments go into a
//! path-variable tree, and request paths resolve to a handler plus bindings.

pub mod config;
pub mod controllers;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use lifecycle::{bootstrap, AppContext, InitError, SharedContext};
pub use routing::{Controller, HandlerDescriptor, PathVars, RouteMatch, RouteTable};
