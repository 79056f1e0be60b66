//! LLMUP - one-shot provisioner for a GPU-accelerated local inference
//! server.
//!
//! One linear procedure: elevate privileges (kept alive by a background
//! renewal task), probe GPU memory, refresh packages, run the vendor
//! installer, start the service, and pull the default models when the GPU
//! is large enough.

pub mod error;
pub mod hardware;
pub mod logging;
pub mod privilege;
pub mod process;
pub mod setup;

pub use error::{SetupError, SetupResult};
