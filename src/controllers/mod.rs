//! Built-in controller sets.
//!
//! | Set      | Controller         | Routes                                   |
//! |----------|--------------------|------------------------------------------|
//! | `spring` | `SpringController` | `/spring/test3.html`, `/spring/index.html` |
//! | `orders` | `OrderController`  | `/order/list.html`, `/order/{orderId}`, `/order/{orderId}/item/...` |

pub mod orders;
pub mod spring;

use std::sync::Arc;

use crate::routing::ControllerCatalog;

pub use orders::OrderController;
pub use spring::SpringController;

/// Catalog containing every built-in controller set.
pub fn builtin_catalog() -> ControllerCatalog {
    let mut catalog = ControllerCatalog::new();
    catalog
        .add("spring", Arc::new(SpringController))
        .add("orders", Arc::new(OrderController::default()));
    catalog
}
