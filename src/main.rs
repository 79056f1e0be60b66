use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, error, info};

use llmup::logging;
use llmup::privilege::SudoElevator;
use llmup::process::{SystemRunner, ToolRunner};
use llmup::setup::{Provisioner, RemoteInstaller};

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Logging first so every later step can report progress
    logging::init();

    // 2. Wire the real tool backends into the orchestrator
    let runner: Arc<dyn ToolRunner> = Arc::new(SystemRunner);
    let elevator = Arc::new(SudoElevator::new(runner.clone()));
    let fetcher = match RemoteInstaller::new() {
        Ok(f) => Arc::new(f),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let provisioner = Provisioner::new(runner, elevator, fetcher);

    // 3. Run and map the outcome to a process exit code
    match provisioner.run().await {
        Ok(report) => {
            info!("host provisioned; {} model(s) pulled", report.models_pulled.len());
            if let Ok(json) = serde_json::to_string(&report) {
                debug!("run report: {}", json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
