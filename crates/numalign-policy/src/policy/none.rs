use numalign_core::{Admission, NumaNodes, ProviderHints, TopologyHint};
use tracing::info;

use super::{MergeContext, Policy};
use crate::error::PolicyResult;

/// Registry name of [`NonePolicy`].
pub const POLICY_NONE: &str = "none";

/// Topology alignment disabled: no merging, every workload is admitted.
#[derive(Debug, Clone)]
pub struct NonePolicy {
    ctx: MergeContext,
}

impl NonePolicy {
    pub fn new(numa_nodes: NumaNodes) -> Self {
        info!("none policy created, topology alignment disabled");
        Self {
            ctx: MergeContext::new(numa_nodes),
        }
    }
}

impl_with_sink!(NonePolicy);

impl Policy for NonePolicy {
    fn name(&self) -> &'static str {
        POLICY_NONE
    }

    fn merge(&self, _providers: &[ProviderHints]) -> PolicyResult<Admission> {
        Ok(self.ctx.decide(self.name(), TopologyHint::default(), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_without_looking_at_hints() {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        let policy = NonePolicy::new(nodes.clone());
        let providers = vec![ProviderHints::single(
            "cpu",
            vec![TopologyHint::new(nodes.mask(&[0]).unwrap(), false)],
        )];

        let admission = policy.merge(&providers).unwrap();
        assert_eq!(policy.name(), "none");
        assert_eq!(admission.hint, TopologyHint::any(false));
        assert!(admission.admit);
    }
}
