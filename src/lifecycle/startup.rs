//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the constant store from configuration
//! - Mount the configured controller sets in order
//! - Register every declared route and freeze the table
//!
//! # Design Decisions
//! - Fail fast: unknown controller sets abort startup
//! - A malformed template only drops that template, unless strict mode is on
//! - The result is an explicit context object; there is no global registry

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, ConstantStore, RouterConfig};
use crate::routing::{discover, Controller, ControllerCatalog, RejectedRoute, RouteMatch, RouteTable};

/// Everything a dispatcher needs, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    routes: RouteTable,
    constants: ConstantStore,
}

impl AppContext {
    pub fn new(routes: RouteTable, constants: ConstantStore) -> Self {
        Self { routes, constants }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn constants(&self) -> &ConstantStore {
        &self.constants
    }

    /// Shorthand for `routes().resolve(path)`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.resolve(path)
    }

    /// Shorthand for `constants().get(key)`.
    pub fn constant(&self, key: &str) -> Option<&str> {
        self.constants.get(key)
    }
}

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown controller set `{name}` (available: {available})")]
    UnknownControllerSet { name: String, available: String },

    #[error("{} route template(s) rejected in strict mode, first: {}", .0.len(), first_rejected(.0))]
    RejectedTemplates(Vec<RejectedRoute>),
}

fn first_rejected(rejected: &[RejectedRoute]) -> String {
    rejected.first().map(ToString::to_string).unwrap_or_default()
}

/// Build the application context from a validated configuration.
pub fn bootstrap(config: &RouterConfig, catalog: &ControllerCatalog) -> Result<AppContext, InitError> {
    let constants = ConstantStore::from_config(&config.constants);

    let mut controllers: Vec<Arc<dyn Controller>> = Vec::new();
    for scan in &config.scan {
        let set = catalog.get(&scan.controllers).ok_or_else(|| {
            InitError::UnknownControllerSet {
                name: scan.controllers.clone(),
                available: catalog.set_names().collect::<Vec<_>>().join(", "),
            }
        })?;
        tracing::debug!(set = %scan.controllers, controllers = set.len(), "Mounting controller set");
        controllers.extend(set.iter().cloned());
    }

    if controllers.is_empty() {
        tracing::warn!("No controller sets configured, route table is empty");
    }

    let mut builder = RouteTable::builder();
    builder.register_all(discover(&controllers));

    if config.routing.strict_templates && !builder.rejected().is_empty() {
        return Err(InitError::RejectedTemplates(builder.rejected().to_vec()));
    }

    let routes = builder.build();
    tracing::info!(
        controllers = controllers.len(),
        static_routes = routes.static_count(),
        dynamic_routes = routes.dynamic_count(),
        rejected = routes.rejected().len(),
        constants = constants.len(),
        "Route table built"
    );

    Ok(AppContext::new(routes, constants))
}
