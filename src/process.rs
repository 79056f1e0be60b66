//! External Tool Execution
//!
//! Every external collaborator (sudo, nvidia-smi, apt-get, systemctl,
//! ollama) is invoked through the ToolRunner trait so tests can substitute
//! recording doubles for the real system tools.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::SetupResult;

/// Outcome of one external command.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code. None when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout. Empty for `run`, which inherits the terminal.
    pub stdout: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Common interface for invoking external tools.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run a command to completion with inherited stdio.
    async fn run(&self, program: &str, args: &[&str]) -> SetupResult<ToolOutput>;

    /// Run a command to completion, capturing its stdout.
    async fn capture(&self, program: &str, args: &[&str]) -> SetupResult<ToolOutput>;
}

/// Production runner backed by tokio's process support.
pub struct SystemRunner;

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> SetupResult<ToolOutput> {
        let status = Command::new(program).args(args).status().await?;
        Ok(ToolOutput {
            code: status.code(),
            stdout: String::new(),
        })
    }

    async fn capture(&self, program: &str, args: &[&str]) -> SetupResult<ToolOutput> {
        let output = Command::new(program).args(args).output().await?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
