//! Static page controller.

use std::sync::Arc;

use crate::routing::{Controller, PathVars, RouteRegistrar};

#[derive(Debug, Default)]
pub struct SpringController;

impl Controller for SpringController {
    fn name(&self) -> &str {
        "SpringController"
    }

    fn register(self: Arc<Self>, routes: &mut RouteRegistrar) {
        routes
            .route("/spring/test3.html", "test3", |_: &PathVars| "test3".to_string())
            .routes(
                &["/spring/index.html", "/spring/home.html"],
                "index",
                |_: &PathVars| "index".to_string(),
            );
    }
}
