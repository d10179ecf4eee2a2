//! mvc-router command line.
//!
//! ```text
//!  mvc.toml ──▶ config ──▶ lifecycle::bootstrap ──▶ AppContext
//!                 │              │                    │
//!                 │      controllers (catalog)        ├─ RouteTable (registry + forest)
//!                 │                                   └─ ConstantStore
//!                 │
//!                 └─ watcher (watch mode) ──▶ SharedContext::reload
//! ```
//!
//! Subcommands:
//! - `resolve <path>`: print the matched handler and bindings as JSON
//! - `routes`: list registered and rejected templates
//! - `constant <key>`: print a configuration constant
//! - `watch`: resolve paths from stdin while hot-reloading the config

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use mvc_router::config::load_config;
use mvc_router::config::watcher::ConfigWatcher;
use mvc_router::controllers::builtin_catalog;
use mvc_router::lifecycle::{bootstrap, AppContext, SharedContext};
use mvc_router::observability::init_logging;
use mvc_router::routing::ControllerCatalog;

#[derive(Parser)]
#[command(name = "mvc-router")]
#[command(about = "Resolve request paths against the MVC route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "mvc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path
    Resolve { path: String },
    /// List registered routes
    Routes,
    /// Print a configuration constant
    Constant { key: String },
    /// Resolve paths read from stdin, reloading the config on change
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        version = env!("CARGO_PKG_VERSION"),
        "mvc-router starting"
    );

    let catalog = builtin_catalog();
    let context = bootstrap(&config, &catalog)?;

    match cli.command {
        Commands::Resolve { path } => {
            let (value, matched) = resolution(&context, &path);
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Routes => {
            let rejected: Vec<String> = context
                .routes()
                .rejected()
                .iter()
                .map(ToString::to_string)
                .collect();
            let listing = json!({
                "routes": context.routes().routes(),
                "rejected": rejected,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Constant { key } => match context.constant(&key) {
            Some(value) => {
                println!("{}", value);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("constant `{}` is not defined", key);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Watch => {
            watch(&cli.config, context, &catalog).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// JSON description of resolving `path`, and whether it matched.
fn resolution(context: &AppContext, path: &str) -> (Value, bool) {
    match context.resolve(path) {
        Some(m) => (
            json!({
                "path": path,
                "matched": true,
                "controller": m.handler.controller_name(),
                "method": m.handler.method(),
                "bindings": m.bindings,
                "view": m.handler.invoke(&m.bindings),
            }),
            true,
        ),
        None => {
            tracing::debug!(path = %path, "No route matched");
            (json!({ "path": path, "matched": false }), false)
        }
    }
}

async fn watch(path: &Path, context: AppContext, catalog: &ControllerCatalog) -> Result<(), Box<dyn Error>> {
    let shared = SharedContext::new(context);
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let request_path = line.trim();
                if request_path.is_empty() {
                    continue;
                }
                let (value, _) = resolution(&shared.current(), request_path);
                println!("{}", serde_json::to_string(&value)?);
            }
            Some(config) = updates.recv() => {
                // Failures are logged by reload; the previous table stays live.
                let _ = shared.reload(&config, catalog);
            }
            _ = &mut ctrl_c => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}
