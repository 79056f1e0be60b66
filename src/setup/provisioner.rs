//! Provisioning Orchestrator
//!
//! Sequences the installation steps and applies the capacity-gated model
//! pulls. Step order is fixed: session bootstrap, accelerator probe,
//! package list refresh, dependency install, vendor installer, service
//! start/enable, conditional pulls. Every external step's exit status is
//! checked; the first non-zero status aborts the run and surfaces the
//! failing tool's own exit code.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{SetupError, SetupResult};
use crate::hardware::probe_accelerator_memory;
use crate::logging;
use crate::privilege::{Elevator, PrivilegedSession};
use crate::process::{ToolOutput, ToolRunner};
use crate::setup::fetch::InstallerFetcher;

/// Minimum accelerator memory for pulling the default models, in megabytes.
pub const MIN_VRAM_MB: u64 = 12288;

/// Models pulled when the accelerator is large enough, in pull order.
pub const DEFAULT_MODELS: [&str; 2] = ["llama3", "phi3"];

/// How often the elevated session is re-validated.
pub const RENEWAL_PERIOD: Duration = Duration::from_secs(60);

/// Summary of one provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub started_at: DateTime<Utc>,
    pub vram_mb: u64,
    /// Whether the server binary already answered on PATH before the
    /// vendor installer ran.
    pub server_was_installed: bool,
    pub models_pulled: Vec<String>,
}

/// Sequences the installation steps against injected tool backends.
pub struct Provisioner {
    runner: Arc<dyn ToolRunner>,
    elevator: Arc<dyn Elevator>,
    fetcher: Arc<dyn InstallerFetcher>,
}

impl Provisioner {
    pub fn new(
        runner: Arc<dyn ToolRunner>,
        elevator: Arc<dyn Elevator>,
        fetcher: Arc<dyn InstallerFetcher>,
    ) -> Self {
        Self {
            runner,
            elevator,
            fetcher,
        }
    }

    /// Run the full procedure.
    ///
    /// The elevated session wraps the whole body. Its renewal task is
    /// stopped when this function returns, success or failure; the guard's
    /// Drop covers unwinding as well.
    pub async fn run(&self) -> SetupResult<ProvisionReport> {
        logging::section("Elevating privileges");
        let mut session = PrivilegedSession::acquire(self.elevator.clone()).await?;
        session.keep_alive(RENEWAL_PERIOD);

        let result = self.provision().await;
        session.release();
        result
    }

    async fn provision(&self) -> SetupResult<ProvisionReport> {
        let started_at = Utc::now();

        logging::section("Probing accelerator memory");
        let vram_mb = probe_accelerator_memory(self.runner.as_ref()).await?;

        logging::section("Refreshing package lists");
        self.step("apt-get update", "sudo", &["apt-get", "update"])
            .await?;
        logging::success("package lists current");

        logging::section("Installing dependencies");
        // the vendor script downloads its payload with curl
        self.step(
            "apt-get install curl",
            "sudo",
            &["apt-get", "install", "-y", "curl"],
        )
        .await?;
        logging::success("curl available");

        logging::section("Installing inference server");
        let server_was_installed = self.server_already_installed().await;
        if server_was_installed {
            info!("server binary already present; vendor installer will refresh it");
        }
        let script = self.fetcher.fetch().await?;
        let script_path = script.to_string_lossy();
        self.step("vendor installer", "sudo", &["sh", script_path.as_ref()])
            .await?;
        logging::success("vendor installer finished");

        logging::section("Starting service");
        self.step("systemctl start", "sudo", &["systemctl", "start", "ollama"])
            .await?;
        self.step(
            "systemctl enable",
            "sudo",
            &["systemctl", "enable", "ollama"],
        )
        .await?;
        logging::success("service running and enabled at boot");

        logging::section("Pulling models");
        let models_pulled = self.pull_models(vram_mb).await?;

        logging::success("provisioning complete");
        Ok(ProvisionReport {
            started_at,
            vram_mb,
            server_was_installed,
            models_pulled,
        })
    }

    /// Pull the default models when the accelerator meets the threshold.
    async fn pull_models(&self, vram_mb: u64) -> SetupResult<Vec<String>> {
        if vram_mb < MIN_VRAM_MB {
            warn!(
                "GPU RAM is insufficient for the default models ({} MB < {} MB); skipping pulls",
                vram_mb, MIN_VRAM_MB
            );
            return Ok(Vec::new());
        }

        info!("GPU RAM is sufficient (>=12GB)");
        let mut pulled = Vec::with_capacity(DEFAULT_MODELS.len());
        for model in DEFAULT_MODELS {
            let step_name = format!("ollama pull {}", model);
            self.step(&step_name, "ollama", &["pull", model]).await?;
            pulled.push(model.to_string());
        }
        Ok(pulled)
    }

    /// Whether the server binary already answers on PATH.
    async fn server_already_installed(&self) -> bool {
        self.runner
            .capture("ollama", &["--version"])
            .await
            .map(|out| out.success())
            .unwrap_or(false)
    }

    /// Run one external step and check its exit status.
    async fn step(&self, name: &str, program: &str, args: &[&str]) -> SetupResult<()> {
        let out = self.runner.run(program, args).await?;
        check_status(name, &out)
    }
}

/// Turn a non-zero exit status into a step error.
fn check_status(step: &str, out: &ToolOutput) -> SetupResult<()> {
    if out.success() {
        Ok(())
    } else {
        Err(SetupError::Step {
            step: step.to_string(),
            code: out.code,
        })
    }
}
