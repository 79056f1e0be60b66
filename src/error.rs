//! LLMUP Error Types
//!
//! Centralized error handling using thiserror for type-safe errors.

use thiserror::Error;

/// Main error type for provisioning operations
#[derive(Debug, Error)]
pub enum SetupError {
    /// The operator could not authenticate for privilege elevation
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The hardware-query tool is absent or produced unusable output
    #[error("Accelerator probe failed: {0}")]
    Probe(String),

    /// An external provisioning step exited with a non-zero status
    #[error("Step '{step}' failed: {status}", status = status_label(.code))]
    Step { step: String, code: Option<i32> },

    /// Fetching the vendor installer script failed
    #[error("Installer fetch failed: {0}")]
    Fetch(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

impl SetupError {
    /// Process exit code for this error.
    ///
    /// Authentication failures always exit with 1. A failed external step
    /// surfaces the tool's own exit code so callers can tell apt-get's 100
    /// from systemctl's 4. Everything else collapses to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::Authentication(_) => 1,
            SetupError::Step { code: Some(c), .. } => {
                u8::try_from(*c).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Result type alias for provisioning operations
pub type SetupResult<T> = Result<T, SetupError>;
