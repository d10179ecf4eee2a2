//! Shared fixtures for integration tests.

use std::sync::Arc;

use mvc_router::routing::{Controller, HandlerDescriptor, PathVars, RouteRegistrar, RouteTable};

/// Controller with no routes of its own, used to build descriptors directly.
pub struct Fixture(pub &'static str);

impl Controller for Fixture {
    fn name(&self) -> &str {
        self.0
    }

    fn register(self: Arc<Self>, _routes: &mut RouteRegistrar) {}
}

/// A descriptor whose handler returns `view`.
pub fn handler(method: &'static str, view: &'static str) -> HandlerDescriptor {
    HandlerDescriptor::new(
        Arc::new(Fixture("FixtureController")),
        method,
        Arc::new(move |_: &PathVars| view.to_string()),
    )
}

/// Build a table from `(template, method)` pairs, one handler per pair.
pub fn table(routes: &[(&str, &'static str)]) -> RouteTable {
    let mut builder = RouteTable::builder();
    for &(template, method) in routes {
        builder
            .register(template, handler(method, method))
            .unwrap_or_else(|e| panic!("{} rejected: {}", template, e));
    }
    builder.build()
}
