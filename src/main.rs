use std::sync::Arc;

use isoserve::config::{AppState, Config};
use isoserve::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    cfg.validate()?;
    logger::init(&cfg)?;

    // Create the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Startup failures (missing root, port in use) end the process here
    let root = cfg.resolve_root()?;
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&cfg.display_url());
    logger::log_config(&addr, &cfg, &root);

    let state = Arc::new(AppState::new(cfg, root));
    server::run(listener, state).await;

    Ok(())
}
