use std::sync::Arc;

use devserve::{browser, config, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg)?);

    // Bind failure (port taken, privileged port) is fatal
    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    let shutdown = Arc::new(server::ShutdownHandle::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    logger::log_server_start(&addr, &state);
    browser::open_if_configured(&state.config);

    server::run(listener, state, shutdown).await?;
    Ok(())
}
