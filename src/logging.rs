//! Logging Facade
//!
//! Leveled progress output for the provisioning run. Levels come straight
//! from tracing; this module only adds the subscriber setup and the two
//! formatting helpers the orchestrator consumes.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the default `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Section header announcing the next provisioning step.
pub fn section(title: &str) {
    info!("==> {}", title);
}

/// Completion marker for a finished step.
pub fn success(msg: &str) {
    info!("    ok: {}", msg);
}
