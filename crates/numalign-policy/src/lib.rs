//! numalign-policy — NUMA topology alignment policies.
//!
//! Hint providers (CPU, memory, devices) each propose candidate NUMA
//! affinities for a workload. This crate combines those independent
//! proposals into one best affinity and an admit/reject verdict. It does
//! not allocate anything; callers act on the returned [`Admission`].
//!
//! # Components
//!
//! - **`filter`** — Drops providers and resources that reported no hints
//! - **`merge`** — Cross-product search for the best combined hint
//! - **`normalize`** — Full-machine affinity becomes "any node"
//! - **`policy`** — The `Policy` trait and its variants
//! - **`registry`** — Policy lookup by configured name
//! - **`diagnostics`** — Reporting hooks for each decision
//! - **`provider`** — Hint provider trait and `TopologyAdmitter`
//!
//! # Architecture
//!
//! ```text
//! TopologyAdmitter
//!   ├── HintProvider × N  (collect ProviderHints)
//!   └── Policy
//!       ├── filter_providers_hints
//!       ├── merge_filtered_hints
//!       ├── normalize
//!       └── verdict ─► DiagnosticsSink
//! ```
//!
//! [`Admission`]: numalign_core::Admission

pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod merge;
pub mod normalize;
pub mod policy;
pub mod provider;
pub mod registry;

pub use diagnostics::{DiagnosticsSink, NoopSink, TracingSink};
pub use error::{PolicyError, PolicyResult};
pub use filter::{HintSlot, filter_providers_hints};
pub use merge::{Permutations, merge_filtered_hints, merge_permutation};
pub use normalize::normalize;
pub use policy::*;
pub use provider::{HintProvider, TopologyAdmitter};
pub use registry::{PolicyKind, new_policy, policy_from_name};
