//! Exact-match handler registry.
//!
//! Source of truth for static routes. Lookups compare the request path
//! byte-for-byte with the registered template; no normalization.

use std::collections::HashMap;

use crate::routing::handler::HandlerDescriptor;

/// Flat mapping from literal template to handler.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerDescriptor>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `template`.
    /// Returns the displaced handler when the template was already present.
    pub fn register(
        &mut self,
        template: impl Into<String>,
        handler: HandlerDescriptor,
    ) -> Option<HandlerDescriptor> {
        self.handlers.insert(template.into(), handler)
    }

    pub fn lookup(&self, path: &str) -> Option<&HandlerDescriptor> {
        self.handlers.get(path)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
