use numalign_core::{Admission, NumaNodes, ProviderHints, TopologyHint};
use tracing::info;

use super::{MergeContext, Policy};
use crate::error::PolicyResult;
use crate::filter::HintSlot;

/// Registry name of [`SingleNumaNodePolicy`].
pub const POLICY_SINGLE_NUMA_NODE: &str = "single-numa-node";

/// Only considers preferred hints that are unconstrained or pinned to
/// exactly one node, then admits iff the best alignment is preferred and
/// lands on at most one node.
///
/// Single-node hints from different providers that share no node merge to an
/// empty affinity. That result is rewritten to `{any, not preferred}` and
/// rejected.
#[derive(Debug, Clone)]
pub struct SingleNumaNodePolicy {
    ctx: MergeContext,
}

impl SingleNumaNodePolicy {
    pub fn new(numa_nodes: NumaNodes) -> Self {
        info!(nodes = ?numa_nodes.ids(), "single numa node policy created");
        Self {
            ctx: MergeContext::new(numa_nodes),
        }
    }
}

impl_with_sink!(SingleNumaNodePolicy);

/// Keep preferred hints that are unconstrained or a single node.
///
/// A slot left empty cannot be satisfied on one node and is replaced by
/// `{any, not preferred}` so the merged result can never be preferred.
pub fn filter_single_numa_hints(slots: Vec<HintSlot>) -> Vec<HintSlot> {
    slots
        .into_iter()
        .map(|slot| {
            let kept: HintSlot = slot
                .into_iter()
                .filter(|h| h.preferred && h.affinity.is_none_or(|m| m.count() == 1))
                .collect();
            if kept.is_empty() {
                vec![TopologyHint::any(false)]
            } else {
                kept
            }
        })
        .collect()
}

impl Policy for SingleNumaNodePolicy {
    fn name(&self) -> &'static str {
        POLICY_SINGLE_NUMA_NODE
    }

    fn merge(&self, providers: &[ProviderHints]) -> PolicyResult<Admission> {
        let mut best = self
            .ctx
            .best_hint(self.name(), providers, filter_single_numa_hints)?;
        if !best.affinity.is_none_or(|m| m.count() == 1) {
            best = TopologyHint::any(false);
        }
        let admit = best.preferred;
        Ok(self.ctx.decide(self.name(), best, admit))
    }
}
