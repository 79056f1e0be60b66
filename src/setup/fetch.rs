//! Vendor Installer Fetcher
//!
//! Streams the server vendor's published install script to a local temp
//! file so the orchestrator can hand it to `sh`.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{SetupError, SetupResult};

/// Where the vendor publishes the server install script.
pub const INSTALLER_URL: &str = "https://ollama.com/install.sh";

/// Fetches the vendor installer and yields the local path to execute.
#[async_trait]
pub trait InstallerFetcher: Send + Sync {
    async fn fetch(&self) -> SetupResult<PathBuf>;
}

/// HTTPS fetcher for the published install script.
pub struct RemoteInstaller {
    client: Client,
    dest: PathBuf,
}

impl RemoteInstaller {
    pub fn new() -> SetupResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| SetupError::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            dest: std::env::temp_dir().join("llmup-server-install.sh"),
        })
    }
}

#[async_trait]
impl InstallerFetcher for RemoteInstaller {
    async fn fetch(&self) -> SetupResult<PathBuf> {
        debug!("fetching installer from {}", INSTALLER_URL);

        let response = self
            .client
            .get(INSTALLER_URL)
            .send()
            .await
            .map_err(|e| SetupError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::Fetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let mut file = File::create(&self.dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SetupError::Fetch(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("installer script saved: {} bytes -> {:?}", written, self.dest);
        Ok(self.dest.clone())
    }
}
