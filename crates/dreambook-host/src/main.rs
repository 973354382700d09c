// Dreambook kiosk host entry point
//
// Spawns the packaged backend executable, gates on its health check,
// then stays resident until the kiosk shuts down. A backend that
// fails to start is logged and tolerated: the kiosk must boot even
// when AI features are unavailable.

use tokio::process::Command;

use dreambook_host::{BackendSupervisor, Readiness, SupervisorConfig};
use dreambook_lib::config::DEFAULT_PORT;

#[tokio::main]
async fn main() {
    env_logger::init();

    let backend_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DREAMBOOK_BACKEND").ok());

    let Some(backend_path) = backend_path else {
        log::error!("usage: dreambook-host <backend-executable>");
        log::error!("(or set DREAMBOOK_BACKEND)");
        std::process::exit(2);
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("[host] backend path: {}", backend_path);
    log::info!("[host] backend port: {}", port);

    let mut command = Command::new(&backend_path);
    command.env("PORT", port.to_string());

    let mut supervisor = BackendSupervisor::new(SupervisorConfig::for_port(port));

    match supervisor.start(command).await {
        Readiness::Ready { attempts } => {
            log::info!("[host] backend ready after {} health check(s)", attempts);
        }
        Readiness::StartupFailed => {
            // Fail-open: the kiosk UI still boots, AI features will
            // surface provider/network errors when used
            log::error!("[host] backend did not become ready; continuing without AI features");
        }
    }

    shutdown_signal().await;

    supervisor.stop();
    log::info!("[host] exiting");
}

/// Resolve when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            log::error!("[host] failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => log::error!("[host] failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("[host] received SIGINT, shutting down"),
        _ = terminate => log::info!("[host] received SIGTERM, shutting down"),
    }
}
