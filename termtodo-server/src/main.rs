//! `TermTodo` server -- in-memory todo HTTP service.
//!
//! An axum server exposing the JSON task API the terminal client talks
//! to. Tasks live in memory and are scoped per owner.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:8080
//! cargo run --bin termtodo-server
//!
//! # Run on custom address
//! cargo run --bin termtodo-server -- --bind 127.0.0.1:3000
//!
//! # Or via environment variable
//! TERMTODO_SERVER_ADDR=127.0.0.1:3000 cargo run --bin termtodo-server
//! ```

use std::sync::Arc;

use clap::Parser;
use termtodo_server::config::{ServerCliArgs, ServerConfig};
use termtodo_server::routes;
use termtodo_server::store::TaskTable;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting termtodo server");

    let state = Arc::new(TaskTable::new());

    match routes::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "todo server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "todo server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start todo server");
            std::process::exit(1);
        }
    }
}
