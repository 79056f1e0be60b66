//! Privileged-Session Manager
//!
//! Acquires elevated execution rights once and keeps the grant alive with a
//! single detached renewal task. The session is an RAII guard: dropping it
//! stops the renewal task, so cleanup happens on every exit path of the
//! parent procedure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{SetupError, SetupResult};
use crate::process::ToolRunner;

/// Privilege-elevation backend.
#[async_trait]
pub trait Elevator: Send + Sync {
    /// Interactive credential prompt. Called once per run.
    async fn authenticate(&self) -> SetupResult<()>;

    /// Silent re-validation of the cached grant.
    async fn refresh(&self) -> SetupResult<()>;
}

/// sudo-backed elevator: `sudo -v` to prompt, `sudo -n -v` to renew.
pub struct SudoElevator {
    runner: Arc<dyn ToolRunner>,
}

impl SudoElevator {
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Elevator for SudoElevator {
    async fn authenticate(&self) -> SetupResult<()> {
        let out = self
            .runner
            .run("sudo", &["-v"])
            .await
            .map_err(|e| SetupError::Authentication(format!("failed to invoke sudo: {}", e)))?;
        if out.success() {
            Ok(())
        } else {
            Err(SetupError::Authentication(
                "sudo could not validate the operator's credentials".into(),
            ))
        }
    }

    async fn refresh(&self) -> SetupResult<()> {
        // -n keeps the renewal non-interactive; a prompt here would hang
        // the detached task
        let out = self
            .runner
            .run("sudo", &["-n", "-v"])
            .await
            .map_err(|e| SetupError::Authentication(format!("failed to invoke sudo: {}", e)))?;
        if out.success() {
            Ok(())
        } else {
            Err(SetupError::Authentication(
                "elevated session expired and could not be renewed".into(),
            ))
        }
    }
}

/// An elevated session plus its renewal task.
pub struct PrivilegedSession {
    elevator: Arc<dyn Elevator>,
    keepalive: Option<JoinHandle<()>>,
}

impl PrivilegedSession {
    /// Prompt the operator once. The caller must treat a failure as fatal.
    pub async fn acquire(elevator: Arc<dyn Elevator>) -> SetupResult<Self> {
        elevator.authenticate().await?;
        debug!("elevated session acquired");
        Ok(Self {
            elevator,
            keepalive: None,
        })
    }

    /// Start the detached renewal loop. At most one task per session;
    /// repeat calls are no-ops.
    pub fn keep_alive(&mut self, period: Duration) {
        if self.keepalive.is_some() {
            return;
        }
        let elevator = self.elevator.clone();
        self.keepalive = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately and the grant is still
            // fresh at that point, so consume it before the loop
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = elevator.refresh().await {
                    warn!("session renewal failed: {}", e);
                }
            }
        }));
        debug!("session renewal task started");
    }

    /// Whether the renewal loop is currently running.
    pub fn is_keeping_alive(&self) -> bool {
        self.keepalive.is_some()
    }

    /// Stop the renewal task. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(handle) = self.keepalive.take() {
            handle.abort();
            debug!("session renewal task stopped");
        }
    }
}

impl Drop for PrivilegedSession {
    fn drop(&mut self) {
        self.release();
    }
}
