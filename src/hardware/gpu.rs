//! GPU Memory Probe
//!
//! Queries the first detected NVIDIA GPU for its total memory using
//! nvidia-smi in machine-readable CSV mode.

use tracing::info;

use crate::error::{SetupError, SetupResult};
use crate::process::ToolRunner;

const NVIDIA_SMI: &str = "nvidia-smi";
const QUERY_ARGS: [&str; 2] = ["--query-gpu=memory.total", "--format=csv,noheader,nounits"];

/// Total memory of the first detected accelerator, in megabytes.
///
/// One shot, no retries. A missing tool, a non-zero exit, or output whose
/// first line is not an integer all fail the probe; there is no CPU
/// fallback because every caller needs a real capacity figure.
pub async fn probe_accelerator_memory(runner: &dyn ToolRunner) -> SetupResult<u64> {
    let out = runner
        .capture(NVIDIA_SMI, &QUERY_ARGS)
        .await
        .map_err(|e| SetupError::Probe(format!("failed to invoke {}: {}", NVIDIA_SMI, e)))?;

    if !out.success() {
        return Err(SetupError::Probe(match out.code {
            Some(c) => format!("{} exited with code {}", NVIDIA_SMI, c),
            None => format!("{} was terminated by a signal", NVIDIA_SMI),
        }));
    }

    let vram_mb = parse_vram_mb(&out.stdout)?;
    info!("detected accelerator with {} MB of memory", vram_mb);
    Ok(vram_mb)
}

/// Parse the first line of `nvidia-smi --query-gpu=memory.total` output.
pub fn parse_vram_mb(raw: &str) -> SetupResult<u64> {
    let line = raw.lines().next().map(str::trim).unwrap_or("");
    line.parse::<u64>()
        .map_err(|_| SetupError::Probe(format!("unparseable memory value: {:?}", line)))
}
