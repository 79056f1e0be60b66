//! Setup Module
//!
//! Fetching the vendor installer and sequencing the provisioning steps.

pub mod fetch;
pub mod provisioner;

pub use fetch::{InstallerFetcher, RemoteInstaller, INSTALLER_URL};
pub use provisioner::{ProvisionReport, Provisioner, DEFAULT_MODELS, MIN_VRAM_MB};
