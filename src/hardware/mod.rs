//! Hardware Detection Module
//!
//! Accelerator memory probing for the capacity-gated model pulls.

pub mod gpu;

pub use gpu::{parse_vram_mb, probe_accelerator_memory};
