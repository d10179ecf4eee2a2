//! Order pages, addressed by path variables.

use std::sync::Arc;

use crate::routing::{Controller, PathVars, RouteRegistrar};

/// Renders order views. `view_prefix` is prepended to every view name.
#[derive(Debug)]
pub struct OrderController {
    view_prefix: String,
}

impl OrderController {
    pub fn new(view_prefix: impl Into<String>) -> Self {
        Self {
            view_prefix: view_prefix.into(),
        }
    }

    fn list(&self) -> String {
        format!("{}list", self.view_prefix)
    }

    fn show(&self, vars: &PathVars) -> String {
        format!("{}show:{}", self.view_prefix, vars.get("orderId").unwrap_or_default())
    }

    fn item(&self, vars: &PathVars) -> String {
        format!(
            "{}item:{}/{}",
            self.view_prefix,
            vars.get("orderId").unwrap_or_default(),
            vars.get("itemId").unwrap_or_default()
        )
    }

    fn latest_item(&self, vars: &PathVars) -> String {
        format!(
            "{}item:{}/latest",
            self.view_prefix,
            vars.get("orderId").unwrap_or_default()
        )
    }
}

impl Default for OrderController {
    fn default() -> Self {
        Self::new("order/")
    }
}

impl Controller for OrderController {
    fn name(&self) -> &str {
        "OrderController"
    }

    fn register(self: Arc<Self>, routes: &mut RouteRegistrar) {
        let list = Arc::clone(&self);
        let show = Arc::clone(&self);
        let item = Arc::clone(&self);
        let latest = self;

        routes
            .route("/order/list.html", "list", move |_: &PathVars| list.list())
            .route("/order/{orderId}", "show", move |vars: &PathVars| show.show(vars))
            .route("/order/{orderId}/item/{itemId}", "item", move |vars: &PathVars| {
                item.item(vars)
            })
            .route("/order/{orderId}/item/latest", "latest_item", move |vars: &PathVars| {
                latest.latest_item(vars)
            });
    }
}
