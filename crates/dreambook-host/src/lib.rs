// Dreambook kiosk host library
//
// The supervisor owns the backend child process: spawn, readiness
// polling against /health, and termination at host shutdown.

pub mod supervisor;

pub use supervisor::{BackendState, BackendSupervisor, Readiness, SupervisorConfig};
