//! End-to-end startup: config file → controller sets → context.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use mvc_router::config::{load_config, parse_config, ConfigError};
use mvc_router::controllers::builtin_catalog;
use mvc_router::lifecycle::{bootstrap, InitError, SharedContext};
use mvc_router::routing::{Controller, ControllerCatalog, PathVars, RouteKind, RouteRegistrar};

const CONFIG: &str = r#"
[[scan]]
controllers = "spring"

[[scan]]
controllers = "orders"

[[constants]]
name = "viewPrefix"
value = "/WEB-INF/views/"

[[constants]]
name = "viewSuffix"
value = ".jsp"
"#;

/// Write `content` into a fresh temp dir; the dir is removed when dropped.
fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_builtin_controllers_from_file() {
    let (_dir, path) = write_config("builtin.toml", CONFIG);
    let config = load_config(&path).unwrap();
    let ctx = bootstrap(&config, &builtin_catalog()).unwrap();

    assert_eq!(ctx.constant("viewPrefix"), Some("/WEB-INF/views/"));
    assert_eq!(ctx.constant("viewSuffix"), Some(".jsp"));
    assert!(ctx.routes().rejected().is_empty());

    let m = ctx.resolve("/spring/test3.html").unwrap();
    assert_eq!(m.handler.controller_name(), "SpringController");
    assert_eq!(m.handler.invoke(&m.bindings), "test3");
    assert!(m.bindings.is_empty());

    let m = ctx.resolve("/order/42/item/7").unwrap();
    assert_eq!(m.handler.controller_name(), "OrderController");
    assert_eq!(m.handler.method(), "item");
    assert_eq!(m.bindings.get("orderId"), Some("42"));
    assert_eq!(m.bindings.get("itemId"), Some("7"));

    assert!(ctx.resolve("/order/42/item").is_none());
    assert!(ctx.resolve("/unknown/path").is_none());
}

#[test]
fn test_route_listing() {
    let config = parse_config(CONFIG).unwrap();
    let ctx = bootstrap(&config, &builtin_catalog()).unwrap();
    let routes = ctx.routes().routes();

    let templates: Vec<&str> = routes.iter().map(|r| r.template.as_str()).collect();
    let mut sorted = templates.clone();
    sorted.sort();
    assert_eq!(templates, sorted);

    let item = routes
        .iter()
        .find(|r| r.template == "/order/{orderId}/item/{itemId}")
        .unwrap();
    assert_eq!(item.kind, RouteKind::Dynamic);
    assert_eq!(item.controller, "OrderController");

    let test3 = routes.iter().find(|r| r.template == "/spring/test3.html").unwrap();
    assert_eq!(test3.kind, RouteKind::Static);
}

#[test]
fn test_invalid_config_is_fatal() {
    let (_dir, path) = write_config("duplicate.toml", "[[constants]]\nname = \"a\"\n[[constants]]\nname = \"a\"\n");
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));

    let init: InitError = err.into();
    assert!(init.to_string().contains("constant `a` is defined more than once"));
}

#[test]
fn test_unknown_controller_set_is_fatal() {
    let config = parse_config("[[scan]]\ncontrollers = \"billing\"\n").unwrap();
    let err = bootstrap(&config, &builtin_catalog()).unwrap_err();
    assert!(matches!(err, InitError::UnknownControllerSet { .. }));
    assert!(err.to_string().contains("billing"));
    assert!(err.to_string().contains("orders, spring"));
}

struct Override;

impl Controller for Override {
    fn name(&self) -> &str {
        "Override"
    }

    fn register(self: Arc<Self>, routes: &mut RouteRegistrar) {
        routes
            .route("/spring/test3.html", "replacement", |_: &PathVars| "replaced".to_string())
            .route("/order/{orderId}/{itemId}", "bad", |_: &PathVars| "bad".to_string())
            .route("/order/{id/broken", "broken", |_: &PathVars| "broken".to_string());
    }
}

fn catalog_with_override() -> ControllerCatalog {
    let mut catalog = builtin_catalog();
    catalog.add("override", Arc::new(Override));
    catalog
}

#[test]
fn test_later_set_overrides_and_bad_template_is_skipped() {
    let config = parse_config(
        "[[scan]]\ncontrollers = \"spring\"\n[[scan]]\ncontrollers = \"override\"\n",
    )
    .unwrap();
    let ctx = bootstrap(&config, &catalog_with_override()).unwrap();

    let m = ctx.resolve("/spring/test3.html").unwrap();
    assert_eq!(m.handler.controller_name(), "Override");
    assert_eq!(m.handler.invoke(&m.bindings), "replaced");

    assert_eq!(ctx.routes().rejected().len(), 1);
    assert_eq!(ctx.routes().rejected()[0].template, "/order/{id/broken");
    assert!(ctx.resolve("/order/1/2").is_some());
}

#[test]
fn test_strict_templates() {
    let config = parse_config(
        "[[scan]]\ncontrollers = \"override\"\n[routing]\nstrict_templates = true\n",
    )
    .unwrap();
    let err = bootstrap(&config, &catalog_with_override()).unwrap_err();
    assert!(matches!(err, InitError::RejectedTemplates(ref r) if r.len() == 1));
}

#[test]
fn test_shared_context_reload() {
    let catalog = builtin_catalog();
    let spring_only = parse_config("[[scan]]\ncontrollers = \"spring\"\n").unwrap();
    let shared = SharedContext::new(bootstrap(&spring_only, &catalog).unwrap());

    let before = shared.current();
    assert!(before.resolve("/order/1").is_none());

    shared.reload(&parse_config(CONFIG).unwrap(), &catalog).unwrap();
    assert!(shared.current().resolve("/order/1").is_some());
    assert!(before.resolve("/order/1").is_none());
}
