// Dreambook backend server entry point
//
// Run with: cargo run --bin dreambook-server
//
// Reads configuration from the environment (.env in development),
// refuses to start with a missing or malformed DeepSeek API key, and
// shuts down gracefully on SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use dreambook_lib::config::AppConfig;
use dreambook_lib::services::ai::DeepSeekClient;
use dreambook_server::{build_router, AppState};

#[tokio::main]
async fn main() {
    // Development convenience; packaged deployments pass real env vars
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = AppConfig::from_env();

    if let Err(e) = config.validate() {
        log::error!("[server] configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let interpreter = Arc::new(DeepSeekClient::new(config.deepseek.clone()));
    let state = AppState::new(interpreter);
    let router = build_router(state, &config);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[server] failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("[server] dream interpretation backend started");
    log::info!("[server] listening on http://{}", addr);
    log::info!("[server] model: {}", config.deepseek.model);

    let serve = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = serve.await {
        log::error!("[server] server error: {}", e);
        std::process::exit(1);
    }

    log::info!("[server] server stopped");
}

/// Resolve when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            log::error!("[server] failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => log::error!("[server] failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("[server] received SIGINT, shutting down"),
        _ = terminate => log::info!("[server] received SIGTERM, shutting down"),
    }
}
