//! Atomic publication of the application context.
//!
//! Readers take a snapshot with `current()` and keep using it for the whole
//! request; a reload publishes a complete new context and never touches the
//! one readers already hold.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::RouterConfig;
use crate::lifecycle::startup::{bootstrap, AppContext, InitError};
use crate::routing::ControllerCatalog;

/// Shared, swappable handle to the live `AppContext`.
#[derive(Debug)]
pub struct SharedContext {
    inner: ArcSwap<AppContext>,
}

impl SharedContext {
    pub fn new(context: AppContext) -> Self {
        Self {
            inner: ArcSwap::from_pointee(context),
        }
    }

    /// Snapshot of the live context.
    pub fn current(&self) -> Arc<AppContext> {
        self.inner.load_full()
    }

    /// Publish `context`, returning the one it replaced.
    pub fn replace(&self, context: AppContext) -> Arc<AppContext> {
        self.inner.swap(Arc::new(context))
    }

    /// Rebuild from `config` and publish. On failure the live context is kept.
    pub fn reload(&self, config: &RouterConfig, catalog: &ControllerCatalog) -> Result<(), InitError> {
        match bootstrap(config, catalog) {
            Ok(context) => {
                let routes = context.routes().len();
                self.replace(context);
                tracing::info!(routes, "Route table reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Reload failed, keeping current route table");
                Err(e)
            }
        }
    }
}
