use numalign_core::{Admission, NumaNodes, ProviderHints, TopologyHint};
use tracing::info;

use super::{MergeContext, Policy};
use crate::error::PolicyResult;

/// Registry name of [`PodLevelSingleNumaNodePolicy`].
pub const POLICY_POD_LEVEL_SINGLE_NUMA_NODE: &str = "pod-level-single-numa-node";

/// Admits a workload iff its best combined alignment is preferred by every
/// contributing provider.
///
/// The merged affinity is not required to be exactly one node; a single
/// node emerges when the providers agree on a narrow preferred affinity.
/// Disjoint preferred hints merge to an empty affinity that is still
/// preferred, and such a workload is admitted.
#[derive(Debug, Clone)]
pub struct PodLevelSingleNumaNodePolicy {
    ctx: MergeContext,
}

impl PodLevelSingleNumaNodePolicy {
    pub fn new(numa_nodes: NumaNodes) -> Self {
        info!(nodes = ?numa_nodes.ids(), "pod level single numa node policy created");
        Self {
            ctx: MergeContext::new(numa_nodes),
        }
    }

    fn can_admit(hint: &TopologyHint) -> bool {
        hint.preferred
    }
}

impl_with_sink!(PodLevelSingleNumaNodePolicy);

impl Policy for PodLevelSingleNumaNodePolicy {
    fn name(&self) -> &'static str {
        POLICY_POD_LEVEL_SINGLE_NUMA_NODE
    }

    fn merge(&self, providers: &[ProviderHints]) -> PolicyResult<Admission> {
        let best = self.ctx.best_hint(self.name(), providers, |slots| slots)?;
        let admit = Self::can_admit(&best);
        Ok(self.ctx.decide(self.name(), best, admit))
    }
}
