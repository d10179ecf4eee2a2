//! Controller discovery and route collection.
//!
//! # Responsibilities
//! - Let each controller declare its `(template, handler)` pairs
//! - Group controllers into named sets that configuration can mount
//! - Flatten mounted controllers into an ordered list of route definitions
//!
//! # Design Decisions
//! - Registration is explicit: controllers call `RouteRegistrar::route`
//! - Definitions keep declaration order so duplicate templates resolve to
//!   the last one declared

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::routing::handler::{Controller, HandlerDescriptor, HandlerFn, PathVars};

/// A declared template together with the handler it maps to.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub template: String,
    pub handler: HandlerDescriptor,
}

/// Collects the routes of one controller.
pub struct RouteRegistrar {
    controller: Arc<dyn Controller>,
    routes: Vec<RouteDefinition>,
}

impl RouteRegistrar {
    pub fn new(controller: Arc<dyn Controller>) -> Self {
        Self {
            controller,
            routes: Vec::new(),
        }
    }

    /// Map `template` to `method`.
    pub fn route<F>(&mut self, template: &str, method: &str, handler: F) -> &mut Self
    where
        F: Fn(&PathVars) -> String + Send + Sync + 'static,
    {
        self.routes(&[template], method, handler)
    }

    /// Map several templates to the same method.
    pub fn routes<F>(&mut self, templates: &[&str], method: &str, handler: F) -> &mut Self
    where
        F: Fn(&PathVars) -> String + Send + Sync + 'static,
    {
        let func: Arc<HandlerFn> = Arc::new(handler);
        let method: Arc<str> = Arc::from(method);
        for template in templates {
            self.routes.push(RouteDefinition {
                template: (*template).to_string(),
                handler: HandlerDescriptor::new(
                    Arc::clone(&self.controller),
                    Arc::clone(&method),
                    Arc::clone(&func),
                ),
            });
        }
        self
    }

    pub fn into_routes(self) -> Vec<RouteDefinition> {
        self.routes
    }
}

/// Ask every controller for its routes, in order.
pub fn discover(controllers: &[Arc<dyn Controller>]) -> Vec<RouteDefinition> {
    let mut routes = Vec::new();
    for controller in controllers {
        let mut registrar = RouteRegistrar::new(Arc::clone(controller));
        Arc::clone(controller).register(&mut registrar);
        let declared = registrar.into_routes();
        if declared.is_empty() {
            tracing::warn!(controller = controller.name(), "Controller declared no routes");
        } else {
            tracing::debug!(
                controller = controller.name(),
                routes = declared.len(),
                "Controller routes collected"
            );
        }
        routes.extend(declared);
    }
    routes
}

/// Named sets of controllers available for mounting.
#[derive(Default, Clone)]
pub struct ControllerCatalog {
    sets: BTreeMap<String, Vec<Arc<dyn Controller>>>,
}

impl ControllerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a controller to the named set, creating the set if needed.
    pub fn add(&mut self, set: &str, controller: Arc<dyn Controller>) -> &mut Self {
        self.sets.entry(set.to_string()).or_default().push(controller);
        self
    }

    pub fn get(&self, set: &str) -> Option<&[Arc<dyn Controller>]> {
        self.sets.get(set).map(Vec::as_slice)
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ControllerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (set, controllers) in &self.sets {
            let names: Vec<&str> = controllers.iter().map(|c| c.name()).collect();
            map.entry(set, &names);
        }
        map.finish()
    }
}
