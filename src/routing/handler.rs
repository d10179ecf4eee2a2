//! Handler descriptors and path-variable bindings.
//!
//! # Responsibilities
//! - Define the `Controller` registration seam
//! - Pair a controller instance with one of its handler methods
//! - Carry variable bindings extracted during resolution
//!
//! # Design Decisions
//! - Controllers register typed handler functions; nothing is looked up by name
//! - Descriptors are immutable and cheap to clone (all fields are `Arc`)

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::discovery::RouteRegistrar;

/// A unit of application logic that owns handler methods.
///
/// Instances are created once at startup and shared by every descriptor
/// that points at them.
pub trait Controller: Send + Sync + 'static {
    /// Name used in logs and route listings.
    fn name(&self) -> &str;

    /// Declare this controller's routes.
    fn register(self: Arc<Self>, routes: &mut RouteRegistrar);
}

/// Handler function signature. Returns the name of the view to render.
pub type HandlerFn = dyn Fn(&PathVars) -> String + Send + Sync;

/// Identifies one invokable handler: owning controller plus method.
#[derive(Clone)]
pub struct HandlerDescriptor {
    controller: Arc<dyn Controller>,
    method: Arc<str>,
    func: Arc<HandlerFn>,
}

impl HandlerDescriptor {
    pub fn new(
        controller: Arc<dyn Controller>,
        method: impl Into<Arc<str>>,
        func: Arc<HandlerFn>,
    ) -> Self {
        Self {
            controller,
            method: method.into(),
            func,
        }
    }

    pub fn controller(&self) -> &Arc<dyn Controller> {
        &self.controller
    }

    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Run the handler with the given bindings.
    pub fn invoke(&self, vars: &PathVars) -> String {
        (self.func)(vars)
    }

    /// True if both descriptors point at the same handler function.
    pub fn same_handler(&self, other: &HandlerDescriptor) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("controller", &self.controller.name())
            .field("method", &self.method)
            .finish()
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller.name(), self.method)
    }
}

/// Variable bindings extracted from a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathVars {
    values: HashMap<String, String>,
}

impl PathVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for PathVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
