//! Route table: registration and path resolution.
//!
//! # Responsibilities
//! - Classify declared templates and store them (registry or forest)
//! - Resolve a request path to a handler plus variable bindings
//! - Keep a record of rejected templates for startup reporting
//!
//! # Design Decisions
//! - Built once by `RouteTableBuilder`, immutable afterwards (`Send + Sync`)
//! - Exact static match first, then the path-variable forest
//! - Explicit `None` for no match; a miss is not an error
//! - Duplicate templates: last registration wins, logged as a warning.
//!   Dynamic templates are duplicates when their shapes match, so
//!   `/order/{id}` and `order/{orderId}` are one route

use std::collections::HashMap;

use serde::Serialize;

use crate::routing::discovery::RouteDefinition;
use crate::routing::handler::{HandlerDescriptor, PathVars};
use crate::routing::registry::HandlerRegistry;
use crate::routing::template::{TemplateError, UrlTemplate};
use crate::routing::tree::PathForest;

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub handler: &'a HandlerDescriptor,
    pub bindings: PathVars,
}

/// Where a template ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Static,
    Dynamic,
}

/// Listing entry for one registered template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub template: String,
    pub controller: String,
    pub method: String,
    pub kind: RouteKind,
}

/// A template that failed validation and was left out of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRoute {
    pub template: String,
    pub controller: String,
    pub error: TemplateError,
}

impl std::fmt::Display for RejectedRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` ({}): {}", self.template, self.controller, self.error)
    }
}

/// Accumulates routes during startup.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    registry: HandlerRegistry,
    forest: PathForest,
    /// Keyed by static text or dynamic shape, mirroring where the handler lives.
    routes: HashMap<String, RouteInfo>,
    rejected: Vec<RejectedRoute>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one template.
    ///
    /// A malformed template is recorded as rejected and its error returned;
    /// the builder stays usable for the remaining templates.
    pub fn register(
        &mut self,
        template: &str,
        handler: HandlerDescriptor,
    ) -> Result<RouteKind, TemplateError> {
        let parsed = match UrlTemplate::parse(template) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::error!(
                    template = %template,
                    controller = handler.controller_name(),
                    error = %error,
                    "Rejected route template"
                );
                self.rejected.push(RejectedRoute {
                    template: template.to_string(),
                    controller: handler.controller_name().to_string(),
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let info = RouteInfo {
            template: template.to_string(),
            controller: handler.controller_name().to_string(),
            method: handler.method().to_string(),
            kind: if parsed.is_dynamic() {
                RouteKind::Dynamic
            } else {
                RouteKind::Static
            },
        };

        let label = handler.to_string();
        let (key, displaced) = match &parsed {
            UrlTemplate::Static(raw) => (raw.clone(), self.registry.register(raw.clone(), handler)),
            UrlTemplate::Dynamic(dynamic) => (dynamic.shape(), self.forest.insert(dynamic, handler)),
        };

        if let Some(previous) = displaced {
            let replaced = self.routes.get(&key).map(|r| r.template.as_str()).unwrap_or_default();
            tracing::warn!(
                template = %template,
                replaced_template = %replaced,
                kind = ?info.kind,
                previous = %previous,
                current = %label,
                "Duplicate route template, last registration wins"
            );
        } else {
            tracing::debug!(template = %template, kind = ?info.kind, "Route registered");
        }

        let kind = info.kind;
        self.routes.insert(key, info);
        Ok(kind)
    }

    /// Register every definition in order. Rejections are recorded, not returned.
    pub fn register_all(&mut self, definitions: impl IntoIterator<Item = RouteDefinition>) -> &mut Self {
        for definition in definitions {
            let _ = self.register(&definition.template, definition.handler);
        }
        self
    }

    pub fn rejected(&self) -> &[RejectedRoute] {
        &self.rejected
    }

    /// Freeze into an immutable table.
    pub fn build(self) -> RouteTable {
        let mut routes: Vec<RouteInfo> = self.routes.into_values().collect();
        routes.sort_by(|a, b| a.template.cmp(&b.template));
        RouteTable {
            registry: self.registry,
            forest: self.forest,
            routes,
            rejected: self.rejected,
        }
    }
}

/// Immutable routing table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    registry: HandlerRegistry,
    forest: PathForest,
    routes: Vec<RouteInfo>,
    rejected: Vec<RejectedRoute>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Resolve a request path to a handler.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        if let Some(handler) = self.registry.lookup(path) {
            return Some(RouteMatch {
                handler,
                bindings: PathVars::new(),
            });
        }

        self.forest
            .find(path)
            .map(|(handler, bindings)| RouteMatch { handler, bindings })
    }

    /// All registered templates, sorted by template text.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn rejected(&self) -> &[RejectedRoute] {
        &self.rejected
    }

    pub fn static_count(&self) -> usize {
        self.registry.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.routes.iter().filter(|r| r.kind == RouteKind::Dynamic).count()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
