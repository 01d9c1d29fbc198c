//! Topology policies.
//!
//! Every policy exposes a name and a `merge` operation that turns the hints
//! of all providers into one [`Admission`]. The merging variants share the
//! same pipeline and differ only in how they pre-filter hints and how they
//! read the merged result:
//!
//! ```text
//! providers ─► filter ─► (variant pre-filter) ─► merge ─► normalize ─► verdict
//! ```

use std::sync::Arc;

use numalign_core::{Admission, NumaNodes, ProviderHints, TopologyHint};

use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::PolicyResult;
use crate::filter::{HintSlot, filter_providers_hints};
use crate::merge::merge_filtered_hints;
use crate::normalize::normalize;

/// Builder method shared by every policy type.
macro_rules! impl_with_sink {
    ($policy:ty) => {
        impl $policy {
            /// Replace the default tracing sink.
            pub fn with_sink(
                mut self,
                sink: std::sync::Arc<dyn $crate::diagnostics::DiagnosticsSink>,
            ) -> Self {
                self.ctx.set_sink(sink);
                self
            }

            /// NUMA nodes of the machine this policy was built for.
            pub fn numa_nodes(&self) -> &numalign_core::NumaNodes {
                self.ctx.numa_nodes()
            }
        }
    };
}

mod best_effort;
mod none;
mod pod_level_single_numa_node;
mod restricted;
mod single_numa_node;

pub use best_effort::{BestEffortPolicy, POLICY_BEST_EFFORT};
pub use none::{NonePolicy, POLICY_NONE};
pub use pod_level_single_numa_node::{
    POLICY_POD_LEVEL_SINGLE_NUMA_NODE, PodLevelSingleNumaNodePolicy,
};
pub use restricted::{POLICY_RESTRICTED, RestrictedPolicy};
pub use single_numa_node::{
    POLICY_SINGLE_NUMA_NODE, SingleNumaNodePolicy, filter_single_numa_hints,
};

/// A named admission strategy.
///
/// Implementations hold nothing but the machine topology, so a single
/// instance can serve concurrent decisions for different workloads.
pub trait Policy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Merge the hints of every provider and decide admission.
    fn merge(&self, providers: &[ProviderHints]) -> PolicyResult<Admission>;
}

/// Machine topology plus diagnostics sink, shared by the merging policies.
#[derive(Clone)]
pub(crate) struct MergeContext {
    numa_nodes: NumaNodes,
    sink: Arc<dyn DiagnosticsSink>,
}

impl MergeContext {
    pub(crate) fn new(numa_nodes: NumaNodes) -> Self {
        Self {
            numa_nodes,
            sink: Arc::new(TracingSink),
        }
    }

    pub(crate) fn set_sink(&mut self, sink: Arc<dyn DiagnosticsSink>) {
        self.sink = sink;
    }

    pub(crate) fn numa_nodes(&self) -> &NumaNodes {
        &self.numa_nodes
    }

    /// filter → `prepare` → merge → normalize.
    pub(crate) fn best_hint(
        &self,
        policy: &str,
        providers: &[ProviderHints],
        prepare: impl FnOnce(Vec<HintSlot>) -> Vec<HintSlot>,
    ) -> PolicyResult<TopologyHint> {
        let slots = prepare(filter_providers_hints(providers));
        self.sink.filtered_hints(policy, &slots);

        let best = normalize(merge_filtered_hints(&self.numa_nodes, &slots)?);
        self.sink.merged(policy, &best);
        Ok(best)
    }

    pub(crate) fn decide(&self, policy: &str, hint: TopologyHint, admit: bool) -> Admission {
        let admission = Admission { hint, admit };
        self.sink.verdict(policy, &admission);
        admission
    }
}

impl std::fmt::Debug for MergeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeContext")
            .field("numa_nodes", &self.numa_nodes.ids())
            .finish_non_exhaustive()
    }
}
