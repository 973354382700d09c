// Backend process supervisor
//
// Owns exactly one child process. Startup is health-check gated:
// after spawning, /health is polled at a fixed interval, each poll
// bounded by its own short timeout so a hung child cannot stall the
// check. Both spawn failure and poll exhaustion are fail-open: the
// host keeps booting, AI features degrade later at the provider layer.

use std::time::Duration;

use tokio::process::{Child, Command};

/// Readiness polling configuration
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Health endpoint of the backend
    pub health_url: String,
    /// Delay between consecutive polls
    pub poll_interval: Duration,
    /// Maximum number of polls before giving up
    pub max_attempts: u32,
    /// Per-poll request timeout
    pub probe_timeout: Duration,
}

impl SupervisorConfig {
    /// Default polling schedule against a local backend port:
    /// 15 attempts, 500 ms apart, 1 s per probe.
    pub fn for_port(port: u16) -> Self {
        Self {
            health_url: format!("http://127.0.0.1:{}/health", port),
            poll_interval: Duration::from_millis(500),
            max_attempts: 15,
            probe_timeout: Duration::from_secs(1),
        }
    }
}

/// Outcome of a start attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Backend answered a health poll; `attempts` polls were needed
    Ready { attempts: u32 },
    /// Spawn failed or all polls were exhausted
    StartupFailed,
}

/// Supervisor state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    NotStarted,
    Starting,
    Ready,
    StartupFailed,
    Exited,
}

/// Supervisor for the backend child process
pub struct BackendSupervisor {
    config: SupervisorConfig,
    client: reqwest::Client,
    child: Option<Child>,
    state: BackendState,
}

impl BackendSupervisor {
    pub fn new(config: SupervisorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            child: None,
            state: BackendState::NotStarted,
        }
    }

    /// Spawn the backend and poll its health endpoint until it is
    /// ready or the maximum attempt count is exhausted.
    ///
    /// Never returns an error: startup failure is reported as
    /// `Readiness::StartupFailed` and logged, and the caller is
    /// expected to continue booting the kiosk regardless.
    pub async fn start(&mut self, mut command: Command) -> Readiness {
        if self.child.is_some() {
            log::warn!("[supervisor] start called while a backend is already supervised");
            return Readiness::StartupFailed;
        }

        self.state = BackendState::Starting;
        command.kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::error!("[supervisor] failed to spawn backend: {}", e);
                self.state = BackendState::StartupFailed;
                return Readiness::StartupFailed;
            }
        };

        log::info!("[supervisor] backend spawned (pid: {:?})", child.id());
        self.child = Some(child);

        // Sequential, time-spaced polls; never more than one in flight
        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(self.config.poll_interval).await;

            if self.probe_once().await {
                log::info!("[supervisor] backend ready after {} attempt(s)", attempt);
                self.state = BackendState::Ready;
                return Readiness::Ready { attempts: attempt };
            }

            if attempt % 3 == 0 {
                log::info!(
                    "[supervisor] backend not ready yet ({}/{})",
                    attempt,
                    self.config.max_attempts
                );
            }
        }

        log::error!(
            "[supervisor] backend health check exhausted after {} attempts",
            self.config.max_attempts
        );
        self.state = BackendState::StartupFailed;
        Readiness::StartupFailed
    }

    async fn probe_once(&self) -> bool {
        let result = self
            .client
            .get(&self.config.health_url)
            .timeout(self.config.probe_timeout)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Send a termination signal to the backend and clear the handle.
    ///
    /// Does not wait for the process to die; kiosk shutdown proceeds
    /// immediately.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            log::info!("[supervisor] terminating backend (pid: {:?})", child.id());
            if let Err(e) = child.start_kill() {
                log::debug!("[supervisor] backend may have already exited: {}", e);
            }
            if self.state == BackendState::Ready {
                self.state = BackendState::Exited;
            }
        }
    }

    /// Current state, observing a child exit if one happened.
    pub fn state(&mut self) -> BackendState {
        if let Some(child) = self.child.as_mut() {
            if let Ok(Some(status)) = child.try_wait() {
                log::warn!("[supervisor] backend exited with {}", status);
                self.child = None;
                self.state = BackendState::Exited;
            }
        }
        self.state
    }
}
