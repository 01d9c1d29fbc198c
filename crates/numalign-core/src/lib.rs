//! numalign-core — shared types for NUMA alignment decisions.
//!
//! - **`bitmask`** — NUMA node universe and immutable affinity masks
//! - **`types`** — topology hints, per-provider hint sets, admission results
//! - **`config`** — numalign.toml parsing
//! - **`error`** — affinity algebra errors

pub mod bitmask;
pub mod config;
pub mod error;
pub mod types;

pub use bitmask::{Bitmask, MAX_NUMA_NODES, NumaNodes};
pub use config::NumalignConfig;
pub use error::{AffinityError, AffinityResult};
pub use types::*;
